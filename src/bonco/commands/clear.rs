use crate::commands::{CmdMessage, CmdResult};
use crate::store::DataStore;

use super::helpers::{
    load_wrong_answers, not_saved_warning, remove_wrong_answers, save_wrong_answers,
};

/// Forgets every record of `set`, or the whole store when `set` is `None`.
///
/// Clearing everything removes the storage key instead of writing an empty blob.
pub fn run<S: DataStore>(store: &mut S, set: Option<&str>) -> CmdResult {
    let mut result = CmdResult::default();

    match set {
        Some(set) => {
            let mut answers = load_wrong_answers(store);
            let dropped = answers.remove(set).map(|records| records.len());
            let saved = save_wrong_answers(store, &answers);
            match dropped {
                Some(n) => result.add_message(CmdMessage::success(format!(
                    "Cleared {} wrong answer{} from {}",
                    n,
                    if n == 1 { "" } else { "s" },
                    set
                ))),
                None => result.add_message(CmdMessage::info(format!(
                    "No wrong answers recorded for {}",
                    set
                ))),
            }
            if !saved {
                result.add_message(not_saved_warning());
            }
        }
        None => {
            if remove_wrong_answers(store) {
                result.add_message(CmdMessage::success("Cleared all wrong answers"));
            } else {
                result.add_message(not_saved_warning());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{get, paths, MessageLevel};
    use crate::model::WRONG_ANSWERS_KEY;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_record("1-1", "a.jpg", 1, 0)
            .with_record("1-1", "b.jpg", 2, 0)
            .with_record("1-2", "c.jpg", 1, 0)
    }

    #[test]
    fn clearing_one_set_leaves_others() {
        let mut fixture = fixture();

        run(&mut fixture.store, Some("1-1"));

        assert!(paths::run(&fixture.store, "1-1").is_empty());
        assert_eq!(paths::run(&fixture.store, "1-2"), vec!["c.jpg"]);
    }

    #[test]
    fn clearing_everything_removes_the_key() {
        let mut fixture = fixture();

        run(&mut fixture.store, None);

        assert!(fixture.store.raw(WRONG_ANSWERS_KEY).is_none());
        assert!(get::run(&fixture.store, None).is_empty());
    }

    #[test]
    fn clearing_unknown_set_keeps_records() {
        let mut fixture = fixture();

        let result = run(&mut fixture.store, Some("9-9"));

        assert_eq!(get::run(&fixture.store, None).len(), 2);
        assert!(result.messages[0].content.contains("No wrong answers"));
    }

    #[test]
    fn failed_clear_warns() {
        let mut fixture = fixture();
        fixture.store.set_simulate_write_error(true);

        let result = run(&mut fixture.store, None);

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(get::run(&fixture.store, None).len(), 2);
    }

    #[test]
    fn reports_number_of_cleared_records() {
        let mut fixture = fixture();
        let result = run(&mut fixture.store, Some("1-1"));
        assert!(result.messages[0].content.contains("Cleared 2 wrong answers"));
    }
}
