#[cfg(test)]
pub mod mock;

/// Notices pushed to the presentation layer. Everything else is pulled from
/// session accessors; only events the moderator must be told about go through
/// here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    /// Number of questions added to the bank.
    ImportSucceeded(usize),
    /// Underlying parse or validation error, ready for display.
    ImportFailed(String),
    /// Why the game could not start.
    ValidationFailed(String),
    /// Final ranking, best score first.
    ScoresRecap(Vec<(String, u32)>),
    ScoresReset,
}

pub trait GameOutput {
    fn say(&mut self, message: &Message);
}
