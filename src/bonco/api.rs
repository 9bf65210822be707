//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for bonco operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the command modules
//! - **Fills in defaults** from [`BoncoConfig`] (top-N limit, deck shuffling)
//! - **Ties sessions to the store**: a "don't know" answer records a miss
//!
//! It does no printing and no formatting; it returns data structures.
//!
//! `BoncoApi<S: DataStore>` is generic over the storage backend:
//! - Production: `BoncoApi<FileStore>`
//! - Testing: `BoncoApi<InMemoryStore>`

use crate::card::Card;
use crate::commands;
use crate::config::BoncoConfig;
use crate::error::Result;
use crate::hangul::{filter_by_choseong, group_by_choseong, ChoseongGroup};
use crate::manifest::Manifest;
use crate::model::WrongAnswers;
use crate::session::QuizSession;
use crate::shuffle::shuffle;
use crate::store::DataStore;
use chrono::{DateTime, Utc};

/// The main API facade for bonco operations.
pub struct BoncoApi<S: DataStore> {
    store: S,
    config: BoncoConfig,
}

impl<S: DataStore> BoncoApi<S> {
    pub fn new(store: S, config: BoncoConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &BoncoConfig {
        &self.config
    }

    pub fn add_wrong_answer(&mut self, set: &str, path: &str) -> CmdResult {
        commands::add::run(&mut self.store, set, path)
    }

    pub fn add_wrong_answer_at(&mut self, set: &str, path: &str, at: DateTime<Utc>) -> CmdResult {
        commands::add::run_at(&mut self.store, set, path, at)
    }

    pub fn get_wrong_answers(&self, set: Option<&str>) -> WrongAnswers {
        commands::get::run(&self.store, set)
    }

    pub fn remove_wrong_answer(&mut self, set: &str, path: &str) -> CmdResult {
        commands::remove::run(&mut self.store, set, path)
    }

    pub fn clear_wrong_answers(&mut self, set: Option<&str>) -> CmdResult {
        commands::clear::run(&mut self.store, set)
    }

    pub fn wrong_answer_stats(&self, set: Option<&str>) -> WrongAnswerStats {
        commands::stats::run(&self.store, set)
    }

    /// Most missed cards; `None` uses the configured limit.
    pub fn top_wrong_answers(&self, limit: Option<usize>) -> Vec<RankedCard> {
        commands::top::run(&self.store, limit.unwrap_or(self.config.top_limit))
    }

    pub fn wrong_answer_paths(&self, set: &str) -> Vec<String> {
        commands::paths::run(&self.store, set)
    }

    /// Choseong navigation of a manifest's cards.
    pub fn groups(&self, manifest: &Manifest) -> Vec<ChoseongGroup<Card>> {
        group_by_choseong(manifest.cards.iter().cloned())
    }

    /// A quiz over `manifest` in batches, optionally narrowed to some choseong buckets.
    pub fn start_quiz(&self, manifest: &Manifest, initials: &[char], batch: BatchSize) -> QuizSession {
        let cards = if initials.is_empty() {
            manifest.cards.clone()
        } else {
            filter_by_choseong(&manifest.cards, initials)
        };
        self.session(&manifest.set, cards, batch)
    }

    /// A quiz over the cards recorded as wrong for `set`. Cards listed in `manifest`
    /// answer with their manifest label.
    pub fn start_wrong_quiz(&self, set: &str, manifest: Option<&Manifest>) -> QuizSession {
        let cards = self
            .wrong_answer_paths(set)
            .into_iter()
            .map(|path| match manifest.and_then(|m| m.card(&path)) {
                Some(card) => card.clone(),
                None => Card::new(path),
            })
            .collect();
        self.session(set, cards, BatchSize::All)
    }

    /// Answers "don't know" for the session's current card and records the miss.
    pub fn dont_know(&mut self, session: &mut QuizSession) -> Result<CmdResult> {
        let card = session.dont_know()?;
        Ok(commands::add::run(&mut self.store, session.set(), &card))
    }

    fn session(&self, set: &str, cards: Vec<Card>, batch: BatchSize) -> QuizSession {
        let cards = if self.config.shuffle {
            shuffle(&cards)
        } else {
            cards
        };
        QuizSession::batched(set, cards, batch)
    }
}

pub use crate::commands::stats::{CardStat, SetStats, WrongAnswerStats};
pub use crate::commands::top::DEFAULT_LIMIT;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, RankedCard};
pub use crate::session::{BatchSize, Phase};
