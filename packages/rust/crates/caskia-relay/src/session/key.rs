//! Opaque session keys.

use std::fmt::{Display, Formatter};

use uuid::Uuid;

/// Identifier correlating a client with its stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// Mint a fresh, globally unique key (UUID v4).
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse `existing` when present and non-blank, otherwise mint once.
    ///
    /// The returned flag is `true` when a new key was minted and has to be
    /// handed back to the caller.
    pub fn resolve(existing: Option<&str>) -> (Self, bool) {
        match existing.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => (Self(value.to_string()), false),
            None => (Self::mint(), true),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
