use anyhow::*;
use serde::{Deserialize, Serialize};

/// One question of the bank. The variant decides how the answer is judged:
/// `Classic` questions carry a free-text answer read aloud by the moderator,
/// `TrueFalse` a boolean, `MultipleChoice` an index into its choice list.
///
/// The serialized shape matches the import/export format: records are tagged
/// by a `type` field (`libre`, `vf`, `qcm`), the prompt travels as `q` and the
/// answer as `a`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum QuestionRecord {
    #[serde(rename = "libre")]
    Classic {
        #[serde(default)]
        theme: String,
        #[serde(rename = "q")]
        prompt: String,
        #[serde(rename = "a", default)]
        answer: String,
    },
    #[serde(rename = "vf")]
    TrueFalse {
        #[serde(default)]
        theme: String,
        #[serde(rename = "q")]
        prompt: String,
        #[serde(rename = "a")]
        answer: bool,
    },
    #[serde(rename = "qcm")]
    MultipleChoice {
        #[serde(default)]
        theme: String,
        #[serde(rename = "q")]
        prompt: String,
        #[serde(default)]
        choices: Vec<String>,
        #[serde(rename = "a")]
        answer: usize,
    },
}

impl QuestionRecord {
    pub fn theme(&self) -> &str {
        match self {
            QuestionRecord::Classic { theme, .. } => theme,
            QuestionRecord::TrueFalse { theme, .. } => theme,
            QuestionRecord::MultipleChoice { theme, .. } => theme,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            QuestionRecord::Classic { prompt, .. } => prompt,
            QuestionRecord::TrueFalse { prompt, .. } => prompt,
            QuestionRecord::MultipleChoice { prompt, .. } => prompt,
        }
    }

    /// The answer as the moderator reads it out.
    pub fn answer_label(&self) -> String {
        match self {
            QuestionRecord::Classic { answer, .. } => answer.clone(),
            QuestionRecord::TrueFalse { answer: true, .. } => "Vrai".to_owned(),
            QuestionRecord::TrueFalse { answer: false, .. } => "Faux".to_owned(),
            QuestionRecord::MultipleChoice {
                choices, answer, ..
            } => choices.get(*answer).cloned().unwrap_or_default(),
        }
    }

    /// Structural check applied to every imported record. A multiple-choice
    /// answer must point inside its choice list.
    pub fn validate(&self) -> Result<()> {
        match self {
            QuestionRecord::MultipleChoice {
                prompt,
                choices,
                answer,
                ..
            } if *answer >= choices.len() => Err(anyhow!(
                "Answer index {} is out of bounds for \"{}\" ({} choices)",
                answer,
                prompt,
                choices.len()
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_records() {
        let record: QuestionRecord =
            serde_json::from_str(r#"{"type":"vf","theme":"Géo","q":"La Terre est ronde","a":true}"#)
                .unwrap();
        assert_eq!(
            record,
            QuestionRecord::TrueFalse {
                theme: "Géo".to_owned(),
                prompt: "La Terre est ronde".to_owned(),
                answer: true,
            }
        );

        let record: QuestionRecord = serde_json::from_str(
            r#"{"type":"qcm","theme":"Maths","q":"2+2=?","choices":["3","4","5"],"a":1}"#,
        )
        .unwrap();
        assert_eq!(record.answer_label(), "4");
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: QuestionRecord =
            serde_json::from_str(r#"{"type":"libre","q":"Capitale de la France ?"}"#).unwrap();
        assert_eq!(record.theme(), "");
        assert_eq!(record.answer_label(), "");
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let record = QuestionRecord::TrueFalse {
            theme: "Géo".to_owned(),
            prompt: "La Terre est ronde".to_owned(),
            answer: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "vf");
        assert_eq!(json["q"], "La Terre est ronde");
        assert_eq!(json["a"], true);
    }

    #[test]
    fn validate_rejects_out_of_bounds_choice() {
        let record = QuestionRecord::MultipleChoice {
            theme: String::new(),
            prompt: "2+2=?".to_owned(),
            choices: vec!["3".to_owned(), "4".to_owned()],
            answer: 2,
        };
        assert!(record.validate().is_err());

        let record = QuestionRecord::MultipleChoice {
            theme: String::new(),
            prompt: "2+2=?".to_owned(),
            choices: vec!["3".to_owned(), "4".to_owned()],
            answer: 1,
        };
        assert!(record.validate().is_ok());
    }
}
