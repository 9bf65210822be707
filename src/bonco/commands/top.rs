use crate::commands::RankedCard;
use crate::store::DataStore;

use super::helpers::{by_misses, load_wrong_answers};

pub const DEFAULT_LIMIT: usize = 10;

/// The `limit` most missed cards across every set.
///
/// Ties go to the most recently missed card, then to set and path order.
pub fn run<S: DataStore>(store: &S, limit: usize) -> Vec<RankedCard> {
    let answers = load_wrong_answers(store);

    let mut cards: Vec<RankedCard> = answers
        .iter()
        .flat_map(|(set, records)| {
            records
                .iter()
                .map(move |(path, record)| RankedCard::new(set, path, record))
        })
        .collect();

    cards.sort_by(|a, b| by_misses(a.count, a.last_wrong, b.count, b.last_wrong));
    cards.truncate(limit);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_record("1-1", "a.jpg", 3, 0)
            .with_record("1-1", "b.jpg", 1, 0)
            .with_record("1-2", "c.jpg", 5, 0)
            .with_record("2-1", "d.jpg", 3, 0)
    }

    #[test]
    fn returns_limit_entries_most_missed_first() {
        let top = run(&fixture().store, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].count, 5);
        assert_eq!(top[0].set, "1-2");
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn large_limit_returns_everything_sorted() {
        let top = run(&fixture().store, 100);
        let counts: Vec<u32> = top.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![5, 3, 3, 1]);
    }

    #[test]
    fn equal_counts_prefer_recent_misses() {
        let fixture = StoreFixture::new()
            .with_record("1-1", "old.jpg", 2, 0)
            .with_record("1-2", "new.jpg", 2, 30);

        let top = run(&fixture.store, DEFAULT_LIMIT);
        assert_eq!(top[0].path, "new.jpg");
        assert_eq!(top[1].path, "old.jpg");
    }

    #[test]
    fn full_ties_fall_back_to_set_then_path() {
        let fixture = StoreFixture::new()
            .with_record("2-1", "a.jpg", 1, 0)
            .with_record("1-1", "b.jpg", 1, 0)
            .with_record("1-1", "a.jpg", 1, 0);

        let top = run(&fixture.store, DEFAULT_LIMIT);
        let keys: Vec<(&str, &str)> = top
            .iter()
            .map(|c| (c.set.as_str(), c.path.as_str()))
            .collect();
        assert_eq!(keys, vec![("1-1", "a.jpg"), ("1-1", "b.jpg"), ("2-1", "a.jpg")]);
    }

    #[test]
    fn zero_limit_or_empty_store_returns_nothing() {
        assert!(run(&fixture().store, 0).is_empty());
        assert!(run(&InMemoryStore::new(), DEFAULT_LIMIT).is_empty());
    }
}
