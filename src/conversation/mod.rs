//! Conversation history, its invariants, and JSON persistence.

mod error;
mod state;
pub mod store;
mod validate;

pub use error::PersistenceError;
pub use state::Conversation;
pub use validate::{validate_tool_pairing, PairingIssue};
