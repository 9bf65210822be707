use crate::store::DataStore;

use super::helpers::load_wrong_answers;

/// Card paths with a wrong-answer record in `set`, in path order.
pub fn run<S: DataStore>(store: &S, set: &str) -> Vec<String> {
    load_wrong_answers(store)
        .remove(set)
        .map(|records| records.into_keys().collect())
        .unwrap_or_default()
}
