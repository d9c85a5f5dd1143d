use crate::bank::QuestionRecord;

/// Question filter applied when deriving the play order for a level.
/// `Mixed` additionally shuffles the filtered list.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    Classic,
    TrueFalseOnly,
    MultipleChoiceOnly,
    Mixed,
}

impl Mode {
    pub fn keeps(self, question: &QuestionRecord) -> bool {
        match self {
            Mode::Classic | Mode::Mixed => true,
            Mode::TrueFalseOnly => matches!(question, QuestionRecord::TrueFalse { .. }),
            Mode::MultipleChoiceOnly => matches!(question, QuestionRecord::MultipleChoice { .. }),
        }
    }
}

/// Session-local knobs. None of these are persisted.
#[derive(Clone, Debug)]
pub struct Settings {
    pub mode: Mode,
    pub timer_enabled: bool,
    pub duration_seconds: u32,
    /// When set, the answer is never exposed, whatever the reveal state.
    pub public_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: Mode::Mixed,
            timer_enabled: true,
            duration_seconds: 30,
            public_mode: false,
        }
    }
}
