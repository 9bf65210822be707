//! # Quiz Sessions
//!
//! A pass over a deck, one batch at a time: the card's image is shown, the answer is
//! revealed, and the learner says whether they knew it. Cards answered "don't know"
//! are collected (once each, in the order missed) per batch and for the whole session,
//! so a batch can be replayed on just its misses.
//!
//! ```text
//!            reveal            know / dont_know
//!   Learn ──────────▶ Learn* ─────────────────▶ Learn (next card)
//!     ▲  ▲                              │
//!     │  │ retry_batch_wrong       last card of the batch
//!     │  │ (batch misses)               ▼
//!     │  └──────────────────  BatchDone (more batches) / Done (last batch)
//!     │                          │
//!     └──── next_batch ──────────┘
//! ```
//!
//! The session only tracks the round. Persisting misses is the API's job, see
//! [`crate::api::BoncoApi::dont_know`].

use crate::card::Card;
use crate::error::{BoncoError, Result};
use crate::shuffle::shuffle_with;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Learn,
    BatchDone,
    Done,
}

/// How many cards one batch holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchSize {
    #[default]
    All,
    Cards(usize),
}

impl BatchSize {
    fn cards_per_batch(self, deck_len: usize) -> usize {
        match self {
            BatchSize::Cards(n) if n > 0 => n,
            _ => deck_len.max(1),
        }
    }
}

impl FromStr for BatchSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(BatchSize::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(BatchSize::Cards(n)),
            _ => Err(format!("expected a positive number or \"all\", got {:?}", s)),
        }
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSize::All => write!(f, "all"),
            BatchSize::Cards(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    set: String,
    deck: Vec<Card>,
    batch_size: usize,
    batch_index: usize,
    cards: Vec<Card>,
    current: usize,
    revealed: bool,
    wrong: Vec<Card>,
    wrong_total: Vec<Card>,
    phase: Phase,
}

impl QuizSession {
    /// A single-batch session over `cards` in the given order. No cards means nothing
    /// to learn.
    pub fn new<C: Into<Card>>(set: impl Into<String>, cards: Vec<C>) -> Self {
        Self::batched(set, cards, BatchSize::All)
    }

    /// A session over `cards` in the given order, cut into batches of `batch`.
    pub fn batched<C: Into<Card>>(set: impl Into<String>, cards: Vec<C>, batch: BatchSize) -> Self {
        let deck: Vec<Card> = cards.into_iter().map(Into::into).collect();
        let batch_size = batch.cards_per_batch(deck.len());
        let mut session = Self {
            set: set.into(),
            deck,
            batch_size,
            batch_index: 0,
            cards: Vec::new(),
            current: 0,
            revealed: false,
            wrong: Vec::new(),
            wrong_total: Vec::new(),
            phase: Phase::Done,
        };
        session.load_batch();
        session
    }

    /// A session over `cards` in random order.
    pub fn shuffled_with<C, R>(
        set: impl Into<String>,
        cards: &[C],
        batch: BatchSize,
        rng: &mut R,
    ) -> Self
    where
        C: Clone + Into<Card>,
        R: Rng + ?Sized,
    {
        Self::batched(set, shuffle_with(cards, rng), batch)
    }

    pub fn set(&self) -> &str {
        &self.set
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The card being asked, `None` between batches and once the session is done.
    pub fn current(&self) -> Option<&Card> {
        match self.phase {
            Phase::Learn => self.cards.get(self.current),
            Phase::BatchDone | Phase::Done => None,
        }
    }

    /// Path of the card being asked.
    pub fn current_card(&self) -> Option<&str> {
        self.current().map(|card| card.path.as_str())
    }

    /// Shows the answer of the current card and returns it.
    pub fn reveal(&mut self) -> Option<&str> {
        if self.phase != Phase::Learn {
            return None;
        }
        self.revealed = true;
        self.current().map(Card::answer)
    }

    pub fn know(&mut self) -> Result<()> {
        self.answered()?;
        self.advance();
        Ok(())
    }

    /// Marks the current card as missed and returns its path.
    pub fn dont_know(&mut self) -> Result<String> {
        let card = self.answered()?;
        for list in [&mut self.wrong, &mut self.wrong_total] {
            if !list.iter().any(|c| c.path == card.path) {
                list.push(card.clone());
            }
        }
        self.advance();
        Ok(card.path)
    }

    /// Cards missed in the current batch, in the order they were first missed.
    pub fn wrong_cards(&self) -> &[Card] {
        &self.wrong
    }

    /// Cards missed anywhere in this session.
    pub fn wrong_total(&self) -> &[Card] {
        &self.wrong_total
    }

    /// `(position, total)` within the current batch, position counted from 1. A
    /// finished batch reports `(total, total)`.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.cards.len();
        match self.phase {
            Phase::Learn => (self.current + 1, total),
            Phase::BatchDone | Phase::Done => (total, total),
        }
    }

    /// `(batch number, batch count)`, the number counted from 1.
    pub fn batch(&self) -> (usize, usize) {
        let count = self.deck.len().div_ceil(self.batch_size);
        (self.batch_index + 1, count)
    }

    /// Moves on to the next batch. Returns `false` unless a batch just finished and
    /// another one follows.
    pub fn next_batch(&mut self) -> bool {
        if self.phase != Phase::BatchDone {
            return false;
        }
        self.batch_index += 1;
        self.load_batch();
        true
    }

    /// Replays a finished batch on its missed cards, shuffled. Returns `false` when
    /// there is nothing to retry.
    pub fn retry_batch_wrong(&mut self) -> bool {
        self.retry_batch_wrong_with(&mut rand::rng())
    }

    pub fn retry_batch_wrong_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.phase == Phase::Learn || self.wrong.is_empty() {
            return false;
        }
        self.cards = shuffle_with(&self.wrong, rng);
        self.start_round();
        true
    }

    fn load_batch(&mut self) {
        let start = (self.batch_index * self.batch_size).min(self.deck.len());
        let end = (start + self.batch_size).min(self.deck.len());
        self.cards = self.deck[start..end].to_vec();
        self.start_round();
    }

    fn start_round(&mut self) {
        self.current = 0;
        self.revealed = false;
        self.wrong.clear();
        self.phase = if self.cards.is_empty() {
            Phase::Done
        } else {
            Phase::Learn
        };
    }

    fn has_next_batch(&self) -> bool {
        (self.batch_index + 1) * self.batch_size < self.deck.len()
    }

    fn answered(&self) -> Result<Card> {
        let card = self.current().ok_or_else(|| {
            BoncoError::Api("No card is being asked right now".to_string())
        })?;
        if !self.revealed {
            return Err(BoncoError::Api("Reveal the answer first".to_string()));
        }
        Ok(card.clone())
    }

    fn advance(&mut self) {
        self.revealed = false;
        if self.current + 1 >= self.cards.len() {
            self.phase = if self.has_next_batch() {
                Phase::BatchDone
            } else {
                Phase::Done
            };
        } else {
            self.current += 1;
        }
    }
}
