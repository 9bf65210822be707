use crate::commands::CmdMessage;
use crate::model::{parse_wrong_answers, WrongAnswers, WRONG_ANSWERS_KEY};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use log::error;
use std::cmp::Ordering;

/// Current store contents. Unreadable storage yields an empty store.
pub fn load_wrong_answers<S: DataStore>(store: &S) -> WrongAnswers {
    match store.get_item(WRONG_ANSWERS_KEY) {
        Ok(Some(raw)) => parse_wrong_answers(&raw),
        Ok(None) => WrongAnswers::new(),
        Err(e) => {
            error!("Failed to load wrong answers: {}", e);
            WrongAnswers::new()
        }
    }
}

/// Persist the whole store. Returns whether the write went through; failures are logged.
pub fn save_wrong_answers<S: DataStore>(store: &mut S, answers: &WrongAnswers) -> bool {
    let blob = match serde_json::to_string(answers) {
        Ok(blob) => blob,
        Err(e) => {
            error!("Failed to serialize wrong answers: {}", e);
            return false;
        }
    };

    match store.set_item(WRONG_ANSWERS_KEY, &blob) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to save wrong answers: {}", e);
            false
        }
    }
}

/// Shown when a mutation could not be written back.
pub fn not_saved_warning() -> CmdMessage {
    CmdMessage::warning("Wrong answers could not be saved; the change is lost")
}

/// Drop the storage key altogether. Failures are logged.
pub fn remove_wrong_answers<S: DataStore>(store: &mut S) -> bool {
    match store.remove_item(WRONG_ANSWERS_KEY) {
        Ok(()) => true,
        Err(e) => {
            error!("Failed to clear wrong answers: {}", e);
            false
        }
    }
}

/// Most missed first. Equal counts: most recently missed first.
pub fn by_misses(
    a_count: u32,
    a_last: DateTime<Utc>,
    b_count: u32,
    b_last: DateTime<Utc>,
) -> Ordering {
    b_count.cmp(&a_count).then_with(|| b_last.cmp(&a_last))
}
