use anyhow::*;
use csv::ReaderBuilder;

use super::QuestionBank;
use crate::bank::question::QuestionRecord;

/// Parses pasted text into a bank fragment. Text starting with `{` is read as
/// a JSON object mapping levels to question lists; anything else goes through
/// the CSV reader. Every record is structurally validated before the fragment
/// is handed back, so a failed import leaves the caller's bank untouched.
pub fn parse(text: &str) -> Result<QuestionBank> {
    let fragment = if text.trim_start().starts_with('{') {
        serde_json::from_str(text).context("Invalid question JSON")?
    } else {
        parse_csv(text)?
    };
    for (level, questions) in &fragment {
        for question in questions {
            question
                .validate()
                .with_context(|| format!("Invalid question in level {}", level))?;
        }
    }
    Ok(fragment)
}

/// Reads CSV question rows: `level,type,theme,prompt,choices,answer`. The
/// first row is a header and is discarded whatever it contains. Rows without
/// a level or a prompt are skipped. Extra columns are ignored and missing
/// trailing columns read as empty.
pub fn parse_csv(text: &str) -> Result<QuestionBank> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut fragment = QuestionBank::new();
    for row in reader.records() {
        let row = row.context("Malformed CSV row")?;
        if let Some((level, record)) = parse_row(&row) {
            fragment
                .entry(level)
                .or_insert_with(Vec::new)
                .push(record);
        }
    }
    Ok(fragment)
}

fn field<'a>(row: &'a csv::StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn parse_row(row: &csv::StringRecord) -> Option<(String, QuestionRecord)> {
    let level = field(row, 0);
    let prompt = field(row, 3);
    if level.is_empty() || prompt.is_empty() {
        return None;
    }

    let theme = field(row, 2).to_owned();
    let prompt = prompt.to_owned();
    let answer_field = field(row, 5);

    let record = match field(row, 1) {
        "qcm" => {
            let choices_field = field(row, 4);
            let choices = if choices_field.is_empty() {
                Vec::new()
            } else {
                choices_field.split('|').map(str::to_owned).collect()
            };
            let answer = answer_field.trim().parse().unwrap_or(0);
            QuestionRecord::MultipleChoice {
                theme,
                prompt,
                choices,
                answer,
            }
        }
        "vf" => {
            let answer = matches!(
                answer_field.trim().to_lowercase().as_str(),
                "true" | "vrai" | "1"
            );
            QuestionRecord::TrueFalse {
                theme,
                prompt,
                answer,
            }
        }
        _ => QuestionRecord::Classic {
            theme,
            prompt,
            answer: answer_field.to_owned(),
        },
    };

    Some((level.to_owned(), record))
}
