use crate::commands::{CmdMessage, CmdResult, RankedCard};
use crate::model::WrongAnswerRecord;
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use log::debug;

use super::helpers::{load_wrong_answers, not_saved_warning, save_wrong_answers};

/// Records a miss of `path` in `set`, stamped with the current time.
pub fn run<S: DataStore>(store: &mut S, set: &str, path: &str) -> CmdResult {
    run_at(store, set, path, Utc::now())
}

/// Records a miss of `path` in `set` at `at`.
///
/// The first miss creates the record with a count of 1; later misses bump the count
/// and move `lastWrong` to `at`.
pub fn run_at<S: DataStore>(store: &mut S, set: &str, path: &str, at: DateTime<Utc>) -> CmdResult {
    let mut answers = load_wrong_answers(store);

    let record = answers
        .entry(set.to_string())
        .or_default()
        .entry(path.to_string())
        .and_modify(|r| r.record_miss(at))
        .or_insert_with(|| WrongAnswerRecord::first_miss(at))
        .clone();

    let saved = save_wrong_answers(store, &answers);
    debug!("Miss #{} recorded for {}/{}", record.count, set, path);

    let card = RankedCard::new(set, path, &record);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Missed {} ({}): {} time{}",
        card.name,
        set,
        card.count,
        if card.count == 1 { "" } else { "s" }
    )));
    if !saved {
        result.add_message(not_saved_warning());
    }
    result.with_affected_cards(vec![card])
}
