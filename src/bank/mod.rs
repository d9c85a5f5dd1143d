use anyhow::*;
use indexmap::IndexMap;

pub mod import;
pub mod question;

pub use question::QuestionRecord;

/// Level name → questions for that level. Insertion order of levels is the
/// display order, so the map must preserve it.
pub type QuestionBank = IndexMap<String, Vec<QuestionRecord>>;

const SEED_JSON: &str = include_str!("../../data/questions.json");

/// The bundled bank used when no saved state exists.
pub fn seed() -> QuestionBank {
    serde_json::from_str(SEED_JSON).expect("bundled question seed is valid")
}

/// Appends every level of `incoming` to `base` without touching either
/// argument. Questions are never deduplicated or removed; levels only present
/// in `base` carry through unchanged.
pub fn merge(base: &QuestionBank, incoming: &QuestionBank) -> QuestionBank {
    let mut merged = base.clone();
    for (level, questions) in incoming {
        merged
            .entry(level.clone())
            .or_insert_with(Vec::new)
            .extend(questions.iter().cloned());
    }
    merged
}

/// The full bank as pretty-printed JSON, ready for the clipboard.
pub fn export_json(bank: &QuestionBank) -> Result<String> {
    Ok(serde_json::to_string_pretty(bank)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic(prompt: &str) -> QuestionRecord {
        QuestionRecord::Classic {
            theme: String::new(),
            prompt: prompt.to_owned(),
            answer: String::new(),
        }
    }

    #[test]
    fn merging_an_empty_fragment_is_a_no_op() {
        let mut bank = QuestionBank::new();
        bank.insert("CP".to_owned(), vec![classic("Q1"), classic("Q2")]);
        assert_eq!(merge(&bank, &QuestionBank::new()), bank);
    }

    #[test]
    fn merge_appends_after_existing_questions() {
        let mut base = QuestionBank::new();
        base.insert("CP".to_owned(), vec![classic("Q1"), classic("Q2")]);
        base.insert("CE1".to_owned(), vec![classic("Q3")]);

        let mut incoming = QuestionBank::new();
        incoming.insert("CP".to_owned(), vec![classic("Q4")]);
        incoming.insert("CM1".to_owned(), vec![classic("Q5")]);

        let merged = merge(&base, &incoming);
        assert_eq!(
            merged["CP"],
            vec![classic("Q1"), classic("Q2"), classic("Q4")]
        );
        assert_eq!(merged["CE1"], vec![classic("Q3")]);
        assert_eq!(merged["CM1"], vec![classic("Q5")]);
        // `base` is untouched
        assert_eq!(base["CP"].len(), 2);
    }

    #[test]
    fn seed_parses_and_is_not_empty() {
        let bank = seed();
        assert!(!bank.is_empty());
        for questions in bank.values() {
            assert!(!questions.is_empty());
            for question in questions {
                question.validate().unwrap();
            }
        }
    }

    #[test]
    fn export_uses_two_space_indentation() {
        let mut bank = QuestionBank::new();
        bank.insert("CP".to_owned(), vec![classic("Q1")]);
        let json = export_json(&bank).unwrap();
        assert!(json.starts_with("{\n  \"CP\""));
        let round_trip: QuestionBank = serde_json::from_str(&json).unwrap();
        assert_eq!(round_trip, bank);
    }
}
