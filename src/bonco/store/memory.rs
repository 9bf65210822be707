use super::DataStore;
use crate::error::{BoncoError, Result};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    items: HashMap<String, String>,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail, as an unavailable storage would.
    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }

    /// Make every write and removal fail, as a full storage would.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Raw access for tests that plant or inspect blobs directly.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl DataStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error {
            return Err(BoncoError::Store("Simulated read error".to_string()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(BoncoError::Store("Simulated write error".to_string()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(BoncoError::Store("Simulated write error".to_string()));
        }
        self.items.remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{WrongAnswerRecord, WrongAnswers, WRONG_ANSWERS_KEY};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        answers: WrongAnswers,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Fixed base time so fixture timestamps are reproducible.
    pub fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                answers: WrongAnswers::new(),
            }
        }

        /// Plant a record with `count` misses, last missed `minutes` after [`base_time`].
        pub fn with_record(mut self, set: &str, path: &str, count: u32, minutes: i64) -> Self {
            let record = WrongAnswerRecord {
                count,
                last_wrong: base_time() + Duration::minutes(minutes),
            };
            self.answers
                .entry(set.to_string())
                .or_default()
                .insert(path.to_string(), record);
            let blob = serde_json::to_string(&self.answers).unwrap();
            self.store.set_item(WRONG_ANSWERS_KEY, &blob).unwrap();
            self
        }

        /// Plant a raw blob, bypassing serialization.
        pub fn with_raw(mut self, raw: &str) -> Self {
            self.store.set_item(WRONG_ANSWERS_KEY, raw).unwrap();
            self
        }
    }
}
