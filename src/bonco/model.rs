use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The single storage key all wrong answers live under.
pub const WRONG_ANSWERS_KEY: &str = "bonco_wrong_answers";

/// How often one card was missed within one set, and when it was last missed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswerRecord {
    pub count: u32,
    pub last_wrong: DateTime<Utc>,
}

impl WrongAnswerRecord {
    pub fn first_miss(at: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            last_wrong: at,
        }
    }

    pub fn record_miss(&mut self, at: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.last_wrong = at;
    }
}

/// Card path -> record, for one set.
pub type SetAnswers = BTreeMap<String, WrongAnswerRecord>;

/// Set id -> that set's records. This is the whole persisted blob.
pub type WrongAnswers = BTreeMap<String, SetAnswers>;

/// Parse a persisted blob without trusting its shape.
///
/// Anything that is not the expected structure is dropped or coerced rather than
/// rejected, so a tampered or older blob still yields whatever records it can:
/// - unparseable JSON or a non-object top level gives an empty store
/// - set entries and records that are not objects are dropped
/// - a missing or non-positive `count` becomes 1
/// - a missing or unparseable `lastWrong` becomes the Unix epoch
/// - sets left without records are dropped
pub fn parse_wrong_answers(raw: &str) -> WrongAnswers {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding unreadable wrong answers: {}", e);
            return WrongAnswers::new();
        }
    };

    let Value::Object(sets) = value else {
        warn!("Discarding wrong answers: top level is not an object");
        return WrongAnswers::new();
    };

    let mut answers = WrongAnswers::new();
    for (set, cards) in sets {
        let Value::Object(cards) = cards else {
            warn!("Dropping set {:?}: entry is not an object", set);
            continue;
        };

        let records: SetAnswers = cards
            .iter()
            .filter_map(|(path, record)| {
                parse_record(&set, path, record).map(|r| (path.clone(), r))
            })
            .collect();

        if !records.is_empty() {
            answers.insert(set, records);
        }
    }
    answers
}

fn parse_record(set: &str, path: &str, value: &Value) -> Option<WrongAnswerRecord> {
    let Value::Object(fields) = value else {
        warn!("Dropping {}/{}: record is not an object", set, path);
        return None;
    };

    let count = parse_count(fields).unwrap_or_else(|| {
        warn!("Coercing count of {}/{} to 1", set, path);
        1
    });

    let last_wrong = fields
        .get("lastWrong")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| {
            warn!("Coercing lastWrong of {}/{} to the epoch", set, path);
            DateTime::<Utc>::UNIX_EPOCH
        });

    Some(WrongAnswerRecord { count, last_wrong })
}

fn parse_count(fields: &Map<String, Value>) -> Option<u32> {
    let raw = fields.get("count")?;
    let n = match raw.as_u64() {
        Some(n) => n,
        None => {
            let f = raw.as_f64()?;
            if !f.is_finite() || f < 1.0 || f.fract() != 0.0 {
                return None;
            }
            f as u64
        }
    };
    if n == 0 {
        return None;
    }
    Some(u32::try_from(n).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_well_formed_blob() {
        let raw = r#"{"1-1":{"001.jpg":{"count":3,"lastWrong":"2024-05-01T10:00:00.000Z"}}}"#;
        let answers = parse_wrong_answers(raw);

        let record = &answers["1-1"]["001.jpg"];
        assert_eq!(record.count, 3);
        assert_eq!(
            record.last_wrong,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn corrupted_json_gives_empty_store() {
        assert!(parse_wrong_answers("{not json").is_empty());
        assert!(parse_wrong_answers("").is_empty());
    }

    #[test]
    fn non_object_top_level_gives_empty_store() {
        assert!(parse_wrong_answers("[1, 2, 3]").is_empty());
        assert!(parse_wrong_answers("\"1-1\"").is_empty());
        assert!(parse_wrong_answers("null").is_empty());
    }

    #[test]
    fn drops_malformed_sets_and_records() {
        let raw = r#"{
            "bad-set": 5,
            "1-1": {
                "a.jpg": "oops",
                "b.jpg": {"count": 2, "lastWrong": "2024-05-01T10:00:00Z"}
            },
            "only-bad": {"c.jpg": []}
        }"#;
        let answers = parse_wrong_answers(raw);

        assert_eq!(answers.len(), 1);
        assert_eq!(answers["1-1"].len(), 1);
        assert!(answers["1-1"].contains_key("b.jpg"));
    }

    #[test]
    fn coerces_missing_fields() {
        let raw = r#"{"1-1":{"a.jpg":{},"b.jpg":{"count":0,"lastWrong":"yesterday"},"c.jpg":{"count":4.0}}}"#;
        let answers = parse_wrong_answers(raw);

        let set = &answers["1-1"];
        assert_eq!(set["a.jpg"].count, 1);
        assert_eq!(set["a.jpg"].last_wrong, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(set["b.jpg"].count, 1);
        assert_eq!(set["b.jpg"].last_wrong, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(set["c.jpg"].count, 4);
    }

    #[test]
    fn fractional_count_is_coerced_to_one() {
        let raw = r#"{"1-1":{"a.jpg":{"count":2.5,"lastWrong":"2024-05-01T10:00:00Z"}}}"#;
        assert_eq!(parse_wrong_answers(raw)["1-1"]["a.jpg"].count, 1);
    }

    #[test]
    fn serializes_in_persisted_layout() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let mut answers = WrongAnswers::new();
        answers
            .entry("1-1".to_string())
            .or_default()
            .insert("001.jpg".to_string(), WrongAnswerRecord::first_miss(at));

        let value = serde_json::to_value(&answers).unwrap();
        assert_eq!(value["1-1"]["001.jpg"]["count"], 1);
        assert!(value["1-1"]["001.jpg"]["lastWrong"].is_string());
        assert_eq!(parse_wrong_answers(&value.to_string()), answers);
    }

    #[test]
    fn record_miss_increments_and_refreshes() {
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut record = WrongAnswerRecord::first_miss(first);
        record.record_miss(second);
        assert_eq!(record.count, 2);
        assert_eq!(record.last_wrong, second);
    }
}
