use bonco::api::{CmdMessage, MessageLevel, RankedCard, WrongAnswerStats};
use bonco::card::Card;
use bonco::hangul::ChoseongGroup;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const SET_WIDTH: usize = 8;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_stats(stats: &WrongAnswerStats) {
    if stats.total_cards == 0 {
        println!("No wrong answers recorded.");
        return;
    }

    println!(
        "{} cards, {} misses",
        stats.total_cards.to_string().bold(),
        stats.total_wrong.to_string().bold()
    );

    for (set, set_stats) in &stats.by_set {
        println!();
        println!("{} {}", set.yellow().bold(), format!("({})", set_stats.count).dimmed());
        for card in &set_stats.cards {
            println!(
                "  {}{}{}",
                pad_to_width(&card.name, NAME_WIDTH),
                format!("{:>4}x", card.count).red(),
                format_time_ago(card.last_wrong).dimmed()
            );
        }
    }
}

pub(super) fn print_top(cards: &[RankedCard]) {
    if cards.is_empty() {
        println!("No wrong answers recorded.");
        return;
    }

    for (i, card) in cards.iter().enumerate() {
        println!(
            "{} {}{}{}{}",
            format!("{:>3}.", i + 1).yellow(),
            pad_to_width(&card.name, NAME_WIDTH),
            pad_to_width(&card.set, SET_WIDTH).dimmed(),
            format!("{:>4}x", card.count).red(),
            format_time_ago(card.last_wrong).dimmed()
        );
    }
}

pub(super) fn print_groups(groups: &[ChoseongGroup<Card>]) {
    if groups.is_empty() {
        println!("No cards found.");
        return;
    }

    for group in groups {
        let names: Vec<&str> = group.cards.iter().map(Card::answer).collect();
        println!(
            "{} {} {}",
            group.key.to_string().yellow().bold(),
            format!("({})", names.len()).dimmed(),
            names.join(", ")
        );
    }
}

/// Pads `s` with spaces to `width` terminal columns, truncating with `…` when too wide.
pub(super) fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width.saturating_sub(1));
    let used = out.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_wide_characters_by_columns() {
        // Hangul syllables take two columns each.
        let padded = pad_to_width("감초", 8);
        assert_eq!(padded.width(), 8);
        assert_eq!(padded, "감초    ");
    }

    #[test]
    fn truncates_long_names() {
        let padded = pad_to_width("가나다라마바사아자차", 8);
        assert_eq!(padded.width(), 8);
        assert!(padded.contains('…'));
    }

    #[test]
    fn short_ascii_is_left_alone() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
    }
}
