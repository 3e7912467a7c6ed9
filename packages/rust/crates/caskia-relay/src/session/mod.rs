//! Session namespace: turn types, session keys, and the session store.

mod key;
mod store;
mod turn;

pub use key::SessionKey;
pub use store::{InMemorySessionStore, SessionStore};
pub use turn::{Role, Turn};
