//! Prompt wrapper errors

use thiserror::Error;

use crate::render::RenderError;

/// Errors from building or formatting a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Missing value for prompt variable '{0}'")]
    MissingVariable(String),
}
