use bonco::api::{BoncoApi, Phase};
use bonco::card::Card;
use bonco::error::Result;
use bonco::session::QuizSession;
use bonco::store::DataStore;
use colored::Colorize;
use std::io::{BufRead, Write};

enum Reply {
    Knew,
    Missed,
    Quit,
    Unknown,
}

fn parse_reply(line: &str) -> Reply {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" | "k" => Reply::Knew,
        "n" | "no" | "d" => Reply::Missed,
        "q" | "quit" => Reply::Quit,
        _ => Reply::Unknown,
    }
}

/// Drives `session` from line-based input until the learner quits or input ends.
pub(super) fn run_quiz<S, R, W>(
    api: &mut BoncoApi<S>,
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    S: DataStore,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();

    loop {
        if session.phase() != Phase::Learn {
            print_summary(session, out)?;
            if !between_rounds(session, input, out, &mut line)? {
                return Ok(());
            }
            continue;
        }

        let Some(card) = session.current().cloned() else {
            return Ok(());
        };
        let (position, total) = session.progress();
        let hint = card.choseong().map(String::from).unwrap_or_default();
        write!(
            out,
            "{} {} {} ",
            format!("[{}/{}]", position, total).dimmed(),
            hint.yellow().bold(),
            "Enter to reveal, q to quit:".dimmed()
        )?;
        out.flush()?;
        if !read_line(input, &mut line)? || matches!(parse_reply(&line), Reply::Quit) {
            return Ok(());
        }

        let answer = session.reveal().unwrap_or_else(|| card.answer()).to_string();
        loop {
            write!(out, "  {} {} ", answer.bold(), "knew it? [y/n/q]".dimmed())?;
            out.flush()?;
            if !read_line(input, &mut line)? {
                return Ok(());
            }
            match parse_reply(&line) {
                Reply::Knew => {
                    session.know()?;
                    break;
                }
                Reply::Missed => {
                    let result = api.dont_know(session)?;
                    for card in &result.affected_cards {
                        writeln!(out, "  {}", format!("missed {}x", card.count).red())?;
                    }
                    break;
                }
                Reply::Quit => return Ok(()),
                Reply::Unknown => continue,
            }
        }
    }
}

/// Asks what to do after a batch. Returns `false` when the quiz is over.
fn between_rounds<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
    line: &mut String,
) -> Result<bool> {
    let can_retry = !session.wrong_cards().is_empty();

    if session.phase() == Phase::Done {
        if !can_retry {
            return Ok(false);
        }
        write!(out, "Retry the missed cards? [y/N] ")?;
        out.flush()?;
        if !read_line(input, line)? || !matches!(parse_reply(line), Reply::Knew) {
            return Ok(false);
        }
        return Ok(session.retry_batch_wrong());
    }

    let prompt = if can_retry {
        "Enter for the next batch, r to retry the missed cards, q to quit:"
    } else {
        "Enter for the next batch, q to quit:"
    };
    write!(out, "{} ", prompt.dimmed())?;
    out.flush()?;
    if !read_line(input, line)? {
        return Ok(false);
    }
    match line.trim().to_lowercase().as_str() {
        "q" | "quit" => Ok(false),
        "r" | "retry" if can_retry => Ok(session.retry_batch_wrong()),
        _ => Ok(session.next_batch()),
    }
}

fn read_line<R: BufRead>(input: &mut R, line: &mut String) -> Result<bool> {
    line.clear();
    Ok(input.read_line(line)? > 0)
}

fn print_summary<W: Write>(session: &QuizSession, out: &mut W) -> Result<()> {
    let (_, total) = session.progress();
    let (batch, batches) = session.batch();
    let wrong = session.wrong_cards();

    let heading = if batches > 1 {
        format!("Batch {}/{} of set {} done.", batch, batches, session.set())
    } else {
        format!("Set {} done.", session.set())
    };
    writeln!(out)?;
    writeln!(
        out,
        "{} {}/{} known",
        heading.green().bold(),
        total - wrong.len(),
        total
    )?;
    if !wrong.is_empty() {
        writeln!(out, "Missed: {}", answers(wrong))?;
    }
    if batches > 1 && session.wrong_total().len() > wrong.len() {
        writeln!(out, "Missed so far: {}", answers(session.wrong_total()))?;
    }
    Ok(())
}

fn answers(cards: &[Card]) -> String {
    cards.iter().map(Card::answer).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bonco::api::BatchSize;
    use bonco::config::BoncoConfig;
    use bonco::store::memory::InMemoryStore;
    use std::io::Cursor;

    fn api() -> BoncoApi<InMemoryStore> {
        let config = BoncoConfig {
            shuffle: false,
            ..BoncoConfig::default()
        };
        BoncoApi::new(InMemoryStore::new(), config)
    }

    fn deck() -> Vec<String> {
        vec!["1-1/감초.jpg".to_string(), "1-1/당귀.jpg".to_string()]
    }

    #[test]
    fn records_misses_from_input() {
        colored::control::set_override(false);
        let mut api = api();
        let mut session = QuizSession::new("1-1", deck());
        let mut input = Cursor::new("\ny\n\nn\nn\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("감초"));
        assert!(text.contains("1/2 known"));
        assert!(text.contains("Missed: 당귀"));
        assert_eq!(api.wrong_answer_paths("1-1"), vec!["1-1/당귀.jpg"]);
    }

    #[test]
    fn retry_replays_missed_cards() {
        colored::control::set_override(false);
        let mut api = api();
        let mut session = QuizSession::new("1-1", deck());
        // Miss both, retry, know the first, miss the second again, decline retry.
        let mut input = Cursor::new("\nn\n\nn\ny\n\ny\n\nn\nn\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        let stats = api.wrong_answer_stats(Some("1-1"));
        assert_eq!(stats.total_wrong, 3);
        assert_eq!(stats.total_cards, 2);
    }

    #[test]
    fn batches_report_misses_so_far() {
        colored::control::set_override(false);
        let mut api = api();
        let deck = vec!["a.jpg", "b.jpg", "c.jpg"];
        let mut session = QuizSession::batched("1-1", deck, BatchSize::Cards(2));
        // a known, b missed, next batch, c missed, input ends at the retry question.
        let mut input = Cursor::new("\ny\n\nn\n\n\nn\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Batch 1/2 of set 1-1 done. 1/2 known"));
        assert!(text.contains("Batch 2/2 of set 1-1 done. 0/1 known"));
        assert!(text.contains("Missed so far: b, c"));
        assert_eq!(api.wrong_answer_paths("1-1"), vec!["b.jpg", "c.jpg"]);
    }

    #[test]
    fn retry_between_batches_stays_on_the_batch() {
        let mut api = api();
        let deck = vec!["a.jpg", "b.jpg", "c.jpg"];
        let mut session = QuizSession::batched("1-1", deck, BatchSize::Cards(2));
        // a missed, b known, retry a and know it, next batch, c known.
        let mut input = Cursor::new("\nn\n\ny\nr\n\ny\n\n\ny\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(session.batch(), (2, 2));
        assert_eq!(api.wrong_answer_stats(None).total_wrong, 1);
    }

    #[test]
    fn labeled_cards_show_their_label() {
        colored::control::set_override(false);
        let mut api = api();
        let mut session = QuizSession::new("1-1", vec![Card::labeled("003.jpg", "황기")]);
        let mut input = Cursor::new("\nn\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ㅎ"));
        assert!(text.contains("Missed: 황기"));
        assert!(!text.contains("003"));
        assert_eq!(api.wrong_answer_paths("1-1"), vec!["003.jpg"]);
    }

    #[test]
    fn quit_stops_without_recording() {
        let mut api = api();
        let mut session = QuizSession::new("1-1", deck());
        let mut input = Cursor::new("q\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        assert!(api.wrong_answer_paths("1-1").is_empty());
        assert_eq!(session.progress(), (1, 2));
    }

    #[test]
    fn unrecognized_reply_asks_again() {
        let mut api = api();
        let mut session = QuizSession::new("1-1", vec!["a.jpg".to_string()]);
        let mut input = Cursor::new("\nmaybe\ny\n");
        let mut out = Vec::new();

        run_quiz(&mut api, &mut session, &mut input, &mut out).unwrap();

        assert_eq!(session.phase(), Phase::Done);
        assert!(session.wrong_cards().is_empty());
    }
}
