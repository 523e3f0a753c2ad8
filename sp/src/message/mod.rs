//! Message/Prompt Wrapper
//!
//! Packages rendered text as a role-tagged [`Message`] or a [`PromptTemplate`]
//! (system turn, optional history placeholder, human turn) for a downstream
//! generation call. Nothing here performs the call.

mod error;
mod prompt;
mod types;

pub use error::PromptError;
pub use prompt::{DEFAULT_HISTORY_SLOT, DEFAULT_HUMAN_SLOT, PromptOptions, PromptTemplate, PromptTurn};
pub use types::{Message, Role};
