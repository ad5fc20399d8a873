//! Conversation memory: the only state Psitone keeps between requests.
//!
//! Turns live for the life of the process and are never persisted, edited
//! or evicted.

mod buffer;
mod conversation;

pub use buffer::{ConversationMemory, ConversationTurn};
pub use conversation::Conversation;
