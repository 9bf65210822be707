//! # Wrong-Answer Commands
//!
//! One module per operation on the wrong-answer store. Each `run` loads the whole
//! blob through [`helpers::load_wrong_answers`], works on plain Rust maps, and (for
//! mutations) writes the whole blob back through [`helpers::save_wrong_answers`].
//!
//! None of these return `Result`: a store that cannot be read looks empty and a write
//! that fails is logged and dropped. Mutations return a [`CmdResult`] for the UI;
//! queries return their data directly.

use crate::hangul::card_label;
use crate::model::WrongAnswerRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod add;
pub mod clear;
pub mod get;
pub mod helpers;
pub mod paths;
pub mod remove;
pub mod stats;
pub mod top;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A wrong-answer record together with where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCard {
    pub set: String,
    pub path: String,
    pub name: String,
    pub count: u32,
    pub last_wrong: DateTime<Utc>,
}

impl RankedCard {
    pub fn new(set: &str, path: &str, record: &WrongAnswerRecord) -> Self {
        Self {
            set: set.to_string(),
            path: path.to_string(),
            name: card_label(path).to_string(),
            count: record.count,
            last_wrong: record.last_wrong,
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cards: Vec<RankedCard>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_cards(mut self, cards: Vec<RankedCard>) -> Self {
        self.affected_cards = cards;
        self
    }
}
