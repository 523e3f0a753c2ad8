//! Chat prompt structure: system turn, optional history slot, human slot

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PromptError;
use super::types::Message;

pub const DEFAULT_HUMAN_SLOT: &str = "input";

pub const DEFAULT_HISTORY_SLOT: &str = "history";

/// How the prompt around a system message is laid out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PromptOptions {
    /// Variable that fills the human turn
    pub human_slot: String,
    pub include_history: bool,
    /// Variable that receives prior conversation messages
    pub history_slot: String,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            human_slot: DEFAULT_HUMAN_SLOT.to_string(),
            include_history: true,
            history_slot: DEFAULT_HISTORY_SLOT.to_string(),
        }
    }
}

impl PromptOptions {
    pub fn without_history(mut self) -> Self {
        self.include_history = false;
        self
    }

    pub fn human_slot(mut self, slot: impl Into<String>) -> Self {
        self.human_slot = slot.into();
        self
    }

    pub fn history_slot(mut self, slot: impl Into<String>) -> Self {
        self.history_slot = slot.into();
        self
    }
}

/// One position in the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromptTurn {
    System { text: String },
    History { slot: String },
    Human { slot: String },
}

/// Prompt ready for a downstream generation call
///
/// Turn order is fixed: system, then the history placeholder when present,
/// then the human turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub system_text: String,
    pub history_slot: Option<String>,
    pub human_slot: String,
}

impl PromptTemplate {
    /// Wrap `system_text` into a prompt laid out by `options`
    pub fn build(system_text: impl Into<String>, options: &PromptOptions) -> Self {
        debug!(?options, "PromptTemplate::build: called");
        Self {
            system_text: system_text.into(),
            history_slot: options.include_history.then(|| options.history_slot.clone()),
            human_slot: options.human_slot.clone(),
        }
    }

    /// Turns in order
    pub fn turns(&self) -> Vec<PromptTurn> {
        let mut turns = vec![PromptTurn::System {
            text: self.system_text.clone(),
        }];
        if let Some(slot) = &self.history_slot {
            turns.push(PromptTurn::History { slot: slot.clone() });
        }
        turns.push(PromptTurn::Human {
            slot: self.human_slot.clone(),
        });
        turns
    }

    /// Variable names the prompt expects when formatted
    pub fn input_variables(&self) -> Vec<&str> {
        self.history_slot
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.human_slot.as_str()))
            .collect()
    }

    /// Produce concrete messages
    ///
    /// `history` is spliced into the history slot (ignored when the prompt has
    /// none); the human turn is filled from `variables`.
    pub fn format_messages(
        &self,
        variables: &BTreeMap<String, String>,
        history: &[Message],
    ) -> Result<Vec<Message>, PromptError> {
        debug!(history_len = history.len(), "PromptTemplate::format_messages: called");
        let human = variables
            .get(&self.human_slot)
            .ok_or_else(|| PromptError::MissingVariable(self.human_slot.clone()))?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(self.system_text.clone()));
        if self.history_slot.is_some() {
            messages.extend(history.iter().cloned());
        } else if !history.is_empty() {
            debug!("PromptTemplate::format_messages: prompt has no history slot, dropping history");
        }
        messages.push(Message::user(human.clone()));
        Ok(messages)
    }

    /// Shorthand for the common single-input case
    pub fn format_input(&self, input: impl Into<String>, history: &[Message]) -> Result<Vec<Message>, PromptError> {
        let variables = BTreeMap::from([(self.human_slot.clone(), input.into())]);
        self.format_messages(&variables, history)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System: {}", self.system_text)?;
        if let Some(slot) = &self.history_slot {
            writeln!(f, "{{{}}}", slot)?;
        }
        write!(f, "Human: {{{}}}", self.human_slot)
    }
}
