use crate::hangul::card_label;
use crate::model::WrongAnswerRecord;
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::get;
use super::helpers::by_misses;

/// One card on a set's review screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStat {
    pub path: String,
    pub name: String,
    pub count: u32,
    pub last_wrong: DateTime<Utc>,
}

impl CardStat {
    fn new(path: &str, record: &WrongAnswerRecord) -> Self {
        Self {
            path: path.to_string(),
            name: card_label(path).to_string(),
            count: record.count,
            last_wrong: record.last_wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetStats {
    /// Number of distinct cards missed in the set.
    pub count: usize,
    /// Most missed first.
    pub cards: Vec<CardStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswerStats {
    /// Sum of all miss counts.
    pub total_wrong: u64,
    /// Number of records.
    pub total_cards: usize,
    pub by_set: BTreeMap<String, SetStats>,
}

/// Review-screen statistics for `set`, or for every set when `set` is `None`.
pub fn run<S: DataStore>(store: &S, set: Option<&str>) -> WrongAnswerStats {
    let answers = get::run(store, set);
    let mut stats = WrongAnswerStats::default();

    for (set, records) in &answers {
        let mut cards: Vec<CardStat> = records
            .iter()
            .map(|(path, record)| CardStat::new(path, record))
            .collect();
        // Records iterate by path, so equal keys keep path order.
        cards.sort_by(|a, b| by_misses(a.count, a.last_wrong, b.count, b.last_wrong));

        stats.total_cards += cards.len();
        stats.total_wrong += cards.iter().map(|c| u64::from(c.count)).sum::<u64>();
        stats.by_set.insert(
            set.clone(),
            SetStats {
                count: cards.len(),
                cards,
            },
        );
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn totals_sum_over_all_records() {
        let fixture = StoreFixture::new()
            .with_record("1-1", "a.jpg", 3, 0)
            .with_record("1-1", "b.jpg", 1, 0)
            .with_record("1-2", "c.jpg", 2, 0);

        let stats = run(&fixture.store, None);

        assert_eq!(stats.total_wrong, 6);
        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.by_set["1-1"].count, 2);
        assert_eq!(stats.by_set["1-2"].count, 1);
    }

    #[test]
    fn cards_sorted_by_count_then_recency() {
        let fixture = StoreFixture::new()
            .with_record("1-1", "a.jpg", 1, 0)
            .with_record("1-1", "b.jpg", 4, 0)
            .with_record("1-1", "c.jpg", 2, 10)
            .with_record("1-1", "d.jpg", 2, 20);

        let stats = run(&fixture.store, Some("1-1"));
        let order: Vec<&str> = stats.by_set["1-1"]
            .cards
            .iter()
            .map(|c| c.path.as_str())
            .collect();

        assert_eq!(order, vec!["b.jpg", "d.jpg", "c.jpg", "a.jpg"]);
    }

    #[test]
    fn scoped_stats_only_count_that_set() {
        let fixture = StoreFixture::new()
            .with_record("1-1", "a.jpg", 3, 0)
            .with_record("1-2", "c.jpg", 2, 0);

        let stats = run(&fixture.store, Some("1-2"));

        assert_eq!(stats.total_wrong, 2);
        assert_eq!(stats.total_cards, 1);
        assert_eq!(stats.by_set.len(), 1);
    }

    #[test]
    fn card_names_drop_directory_and_extension() {
        let fixture = StoreFixture::new().with_record("1-1", "1-1/황기.jpeg", 1, 0);
        let stats = run(&fixture.store, None);
        assert_eq!(stats.by_set["1-1"].cards[0].name, "황기");
    }

    #[test]
    fn empty_store_gives_zero_totals() {
        let stats = run(&InMemoryStore::new(), None);
        assert_eq!(stats, WrongAnswerStats::default());
    }

    #[test]
    fn repeated_reads_are_equal() {
        let fixture = StoreFixture::new()
            .with_record("1-1", "a.jpg", 2, 0)
            .with_record("1-1", "b.jpg", 2, 0)
            .with_record("2-1", "c.jpg", 5, 3);

        assert_eq!(run(&fixture.store, None), run(&fixture.store, None));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let fixture = StoreFixture::new().with_record("1-1", "a.jpg", 2, 0);
        let value = serde_json::to_value(run(&fixture.store, None)).unwrap();

        assert_eq!(value["totalWrong"], 2);
        assert_eq!(value["totalCards"], 1);
        assert_eq!(value["bySet"]["1-1"]["cards"][0]["name"], "a");
        assert!(value["bySet"]["1-1"]["cards"][0]["lastWrong"].is_string());
    }
}
