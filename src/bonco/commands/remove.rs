use crate::commands::{CmdMessage, CmdResult, RankedCard};
use crate::hangul::card_label;
use crate::store::DataStore;
use log::debug;

use super::helpers::{load_wrong_answers, not_saved_warning, save_wrong_answers};

/// Forgets the record of `path` in `set`. A set left without records goes too.
pub fn run<S: DataStore>(store: &mut S, set: &str, path: &str) -> CmdResult {
    let mut answers = load_wrong_answers(store);
    let mut result = CmdResult::default();

    let removed = answers
        .get_mut(set)
        .and_then(|records| records.remove(path));
    let Some(record) = removed else {
        result.add_message(CmdMessage::info(format!(
            "No wrong answer recorded for {} ({})",
            card_label(path),
            set
        )));
        return result;
    };

    if answers.get(set).is_some_and(|records| records.is_empty()) {
        answers.remove(set);
        debug!("Set {} has no wrong answers left", set);
    }
    let saved = save_wrong_answers(store, &answers);

    let card = RankedCard::new(set, path, &record);
    result.add_message(CmdMessage::success(format!(
        "Removed {} ({})",
        card.name, set
    )));
    if !saved {
        result.add_message(not_saved_warning());
    }
    result.with_affected_cards(vec![card])
}
