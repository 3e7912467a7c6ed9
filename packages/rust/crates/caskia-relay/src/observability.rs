//! Stable event names attached to structured log records.

/// Session lifecycle events (`event = ...` field on tracing records).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionEvent {
    SessionCreated,
    SessionTurnAppended,
    SessionTurnsLoaded,
    SessionKeyMinted,
}

impl SessionEvent {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::SessionCreated => "caskia.session.created",
            Self::SessionTurnAppended => "caskia.session.turn_appended",
            Self::SessionTurnsLoaded => "caskia.session.loaded",
            Self::SessionKeyMinted => "caskia.session.key_minted",
        }
    }
}

/// Exchange events emitted by the relay and the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExchangeEvent {
    ExchangeCompleted,
    ExchangeRejected,
    ExchangeFailed,
    MockReplyServed,
}

impl ExchangeEvent {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::ExchangeCompleted => "caskia.exchange.completed",
            Self::ExchangeRejected => "caskia.exchange.rejected",
            Self::ExchangeFailed => "caskia.exchange.failed",
            Self::MockReplyServed => "caskia.exchange.mock_reply",
        }
    }
}
