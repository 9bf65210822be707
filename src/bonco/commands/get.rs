use crate::model::WrongAnswers;
use crate::store::DataStore;

use super::helpers::load_wrong_answers;

/// The whole store, or just `set` (present even when it has no records).
pub fn run<S: DataStore>(store: &S, set: Option<&str>) -> WrongAnswers {
    let mut answers = load_wrong_answers(store);

    match set {
        Some(set) => {
            let records = answers.remove(set).unwrap_or_default();
            WrongAnswers::from([(set.to_string(), records)])
        }
        None => answers,
    }
}
