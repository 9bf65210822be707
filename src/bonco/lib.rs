//! # Bonco Architecture
//!
//! Bonco is a **UI-agnostic flashcard library** for drilling image-labeled vocabulary
//! (herbal medicine names). The `bonco` binary is one client of it; a web front end or a
//! desktop app could be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, sessions and manifests        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Wrong-answer bookkeeping and statistics                  │
//! │  - Storage failures are logged and swallowed here           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: string values under string keys        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Next to the layers sit the pure helpers: [`shuffle`] (Fisher-Yates) and
//! [`hangul`] (choseong buckets for grouping and filtering cards).
//!
//! ## Losing the tracker never blocks studying
//!
//! Wrong-answer tracking is a convenience. When the backing store cannot be read or
//! written, commands log the failure through the `log` facade and carry on with an
//! empty store or a skipped write. Only configuration and manifest problems surface as
//! [`error::BoncoError`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Wrong-answer operations
//! - [`store`]: Storage abstraction and implementations
//! - [`card`]: A study card and its answer
//! - [`model`]: Persisted types (`WrongAnswers`, `WrongAnswerRecord`) and load validation
//! - [`hangul`]: Choseong classification, card labels, grouping
//! - [`shuffle`]: Random permutations
//! - [`session`]: Quiz session state machine, in batches
//! - [`manifest`]: Study set manifests
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod card;
pub mod commands;
pub mod config;
pub mod error;
pub mod hangul;
pub mod manifest;
pub mod model;
pub mod session;
pub mod shuffle;
pub mod store;
