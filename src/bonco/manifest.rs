//! # Study Set Manifests
//!
//! A manifest lists the cards of one study set, in order, as a JSON array. Entries are
//! either bare card paths or `{ "file": ..., "label": ... }` objects as written by the
//! image list generator:
//!
//! ```json
//! ["1-1/감초.jpg", "1-1/당귀.jpg", { "file": "003.jpg", "label": "황기" }]
//! ```
//!
//! A label, when present, is the card's answer: the generator renames images to
//! numbers and keeps the real name only there.
//!
//! Manifests named `imageList-<set>.json` carry their set id in the file name.

use crate::card::Card;
use crate::error::{BoncoError, Result};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const FILE_PREFIX: &str = "imageList-";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Path(String),
    Labeled {
        file: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<ManifestEntry> for Card {
    fn from(entry: ManifestEntry) -> Self {
        match entry {
            ManifestEntry::Path(path) => Card::new(path),
            ManifestEntry::Labeled { file, label } => Card { path: file, label },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub set: String,
    pub cards: Vec<Card>,
}

impl Manifest {
    /// Read a manifest file. The set id comes from the file name.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| BoncoError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(set_id_from_path(path), &raw).map_err(|e| match e {
            BoncoError::Serialization(e) => BoncoError::Manifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
            other => other,
        })
    }

    /// Parse manifest JSON for `set`. Empty entries are skipped.
    pub fn from_json(set: impl Into<String>, raw: &str) -> Result<Self> {
        let set = set.into();
        let entries: Vec<ManifestEntry> = serde_json::from_str(raw)?;
        let cards = entries
            .into_iter()
            .map(Card::from)
            .filter(|card| {
                if card.path.trim().is_empty() {
                    warn!("Skipping empty card entry in manifest for {}", set);
                    false
                } else {
                    true
                }
            })
            .collect();
        Ok(Self { set, cards })
    }

    /// The card stored at `path`, if the manifest lists it.
    pub fn card(&self, path: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.path.as_str()).collect()
    }

    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = set.into();
        self
    }
}

/// `imageList-1-1.json` -> `1-1`; any other file -> its stem.
pub fn set_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match stem.strip_prefix(FILE_PREFIX) {
        Some(set) if !set.is_empty() => set.to_string(),
        _ => stem,
    }
}
