use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A contestant or team. Roster position doubles as the identifier for
/// point awards, so the roster order is meaningful.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub score: u32,
}

impl Player {
    pub fn new(name: String) -> Self {
        Player { name, score: 0 }
    }

    /// Applies a point delta. Scores never go below zero.
    pub fn update_score(&mut self, delta: i32) {
        let score = i64::from(self.score) + i64::from(delta);
        self.score = score.max(0) as u32;
    }

    pub fn has_blank_name(&self) -> bool {
        self.name.trim().is_empty()
    }
}

pub type RosterHandle = Arc<RwLock<Vec<Player>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_clamps_at_zero() {
        let mut player = Player::new("Équipe A".to_owned());
        player.update_score(-1);
        assert_eq!(player.score, 0);

        player.score = 2;
        player.update_score(-1);
        assert_eq!(player.score, 1);
        player.update_score(-1);
        assert_eq!(player.score, 0);
        player.update_score(-1);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn whitespace_only_names_are_blank() {
        assert!(Player::new(String::new()).has_blank_name());
        assert!(Player::new("   ".to_owned()).has_blank_name());
        assert!(!Player::new("Équipe A".to_owned()).has_blank_name());
    }
}
