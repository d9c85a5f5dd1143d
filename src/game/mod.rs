use anyhow::{anyhow, Result};
use itertools::Itertools;
use log::{debug, warn};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::sync::Arc;

pub mod countdown;
pub mod player;
pub mod settings;


use crate::bank::{self, QuestionBank, QuestionRecord};
use crate::game::countdown::Countdown;
use crate::game::player::{Player, RosterHandle};
use crate::game::settings::{Mode, Settings};
use crate::output::{GameOutput, Message};
use crate::storage::{Snapshot, SnapshotStore};

const DEFAULT_LEVEL: &str = "CP";
const ERROR_ROSTER_INCOMPLETE: &str = "Ajoute au moins un candidat et un nom.";

enum Phase {
    Setup,
    Game(GameState),
    Results,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Game(_) => "game",
            Phase::Results => "results",
        }
    }
}

struct GameState {
    current_index: usize,
    revealed: bool,
    countdown: Option<Countdown>,
}

impl GameState {
    fn rearm_countdown(&mut self, settings: &Settings) {
        // Cancel first; at most one countdown may be live per session.
        self.countdown.take();
        if settings.timer_enabled {
            self.countdown = Some(Countdown::start(settings.duration_seconds));
        }
    }
}

/// Walks the moderator through one game: setup (roster and settings), the
/// question run, then the final ranking. Every committed change to the level,
/// roster or bank is pushed to the injected store; save failures are logged
/// and swallowed.
pub struct Session<O: GameOutput, S: SnapshotStore> {
    bank: QuestionBank,
    level: String,
    players: RosterHandle,
    settings: Settings,
    question_order: Vec<QuestionRecord>,
    phase: Phase,
    output: O,
    store: S,
}

impl<O: GameOutput, S: SnapshotStore> Session<O, S> {
    /// Restores the saved document if there is one, otherwise starts from the
    /// bundled seed and a two-team roster. A failed load falls back to the
    /// defaults rather than blocking startup.
    pub fn new(output: O, store: S) -> Self {
        let snapshot = store.load().unwrap_or_else(|e| {
            warn!("Could not load saved state: {:#}", e);
            None
        });
        let (level, players, bank) = match snapshot {
            Some(snapshot) => (snapshot.level, snapshot.players, snapshot.questions_map),
            None => (
                DEFAULT_LEVEL.to_owned(),
                vec![
                    Player::new("Équipe A".to_owned()),
                    Player::new("Équipe B".to_owned()),
                ],
                bank::seed(),
            ),
        };
        let mut session = Session {
            bank,
            level,
            players: Arc::new(RwLock::new(players)),
            settings: Settings::default(),
            question_order: Vec::new(),
            phase: Phase::Setup,
            output,
            store,
        };
        session.recompute_question_order();
        session
    }

    /// Guarded setup → game transition. Rejected while the roster is empty or
    /// any name is blank; nothing changes in that case.
    pub fn start_game(&mut self) -> Result<()> {
        if !self.in_setup() {
            return Err(anyhow!("Cannot start a game outside of the setup phase"));
        }
        let roster_incomplete = {
            let players = self.players.read();
            players.is_empty() || players.iter().any(Player::has_blank_name)
        };
        if roster_incomplete {
            self.output
                .say(&Message::ValidationFailed(ERROR_ROSTER_INCOMPLETE.to_owned()));
            return Err(anyhow!(ERROR_ROSTER_INCOMPLETE));
        }

        let mut state = GameState {
            current_index: 0,
            revealed: false,
            countdown: None,
        };
        state.rearm_countdown(&self.settings);
        self.set_phase(Phase::Game(state));
        Ok(())
    }

    /// Hides the answer and moves on. Exhausting the question order ends the
    /// game, which also happens on the first call when the order is empty.
    pub fn next_question(&mut self) {
        let settings = self.settings.clone();
        let num_questions = self.question_order.len();
        match &mut self.phase {
            Phase::Game(state) => {
                state.revealed = false;
                if state.current_index + 1 < num_questions {
                    state.current_index += 1;
                    state.rearm_countdown(&settings);
                    return;
                }
            }
            _ => return,
        }
        self.finish_game();
    }

    pub fn toggle_reveal(&mut self) {
        if let Phase::Game(state) = &mut self.phase {
            state.revealed = !state.revealed;
        }
    }

    /// Whether the presentation may show the answer right now. Public mode
    /// wins over the reveal toggle.
    pub fn answer_visible(&self) -> bool {
        match &self.phase {
            Phase::Game(state) => state.revealed && !self.settings.public_mode,
            _ => false,
        }
    }

    /// Adds `delta` points (−1 is the penalty/undo gesture) to the player at
    /// that roster position, clamped at zero. The index must be in range;
    /// callers own that contract.
    pub fn give_point(&mut self, player_index: usize, delta: i32) {
        self.players.write()[player_index].update_score(delta);
        self.persist();
    }

    /// Results → setup replay. Scores drop to zero; roster, level and bank
    /// stay as they are.
    pub fn reset_game(&mut self) {
        for player in self.players.write().iter_mut() {
            player.score = 0;
        }
        self.output.say(&Message::ScoresReset);
        self.set_phase(Phase::Setup);
        self.persist();
    }

    /// Merges pasted questions (JSON or CSV) into the bank. On failure the
    /// bank is left as it was and the error is surfaced as a notice.
    pub fn import_questions(&mut self, text: &str) {
        match bank::import::parse(text) {
            Ok(fragment) => {
                let added = fragment.values().map(Vec::len).sum();
                self.bank = bank::merge(&self.bank, &fragment);
                self.recompute_question_order();
                self.persist();
                self.output.say(&Message::ImportSucceeded(added));
            }
            Err(e) => {
                self.output.say(&Message::ImportFailed(format!("{:#}", e)));
            }
        }
    }

    pub fn export_json(&self) -> Result<String> {
        bank::export_json(&self.bank)
    }

    pub fn set_level(&mut self, level: String) {
        self.level = level;
        self.recompute_question_order();
        self.persist();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.settings.mode = mode;
        self.recompute_question_order();
    }

    pub fn set_timer_enabled(&mut self, enabled: bool) {
        self.settings.timer_enabled = enabled;
        self.rearm_if_playing();
    }

    pub fn set_duration_seconds(&mut self, seconds: u32) {
        self.settings.duration_seconds = seconds;
        self.rearm_if_playing();
    }

    pub fn set_public_mode(&mut self, enabled: bool) {
        self.settings.public_mode = enabled;
    }

    pub fn add_player(&mut self) {
        self.players.write().push(Player::new(String::new()));
        self.persist();
    }

    pub fn remove_player(&mut self, player_index: usize) {
        self.players.write().remove(player_index);
        self.persist();
    }

    pub fn rename_player(&mut self, player_index: usize, name: String) {
        self.players.write()[player_index].name = name;
        self.persist();
    }

    /// Roster sorted by descending score; ties keep roster order.
    pub fn rankings(&self) -> Vec<(String, u32)> {
        self.players
            .read()
            .iter()
            .map(|p| (p.name.clone(), p.score))
            .sorted_by_key(|(_, score)| Reverse(*score))
            .collect()
    }

    pub fn levels(&self) -> Vec<String> {
        self.bank.keys().cloned().collect()
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn players(&self) -> RosterHandle {
        Arc::clone(&self.players)
    }

    pub fn question_order(&self) -> &[QuestionRecord] {
        &self.question_order
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        match &self.phase {
            Phase::Game(state) => self.question_order.get(state.current_index),
            _ => None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Game(state) => Some(state.current_index),
            _ => None,
        }
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        match &self.phase {
            Phase::Game(state) => state.countdown.as_ref().map(Countdown::remaining_seconds),
            _ => None,
        }
    }

    pub fn in_setup(&self) -> bool {
        matches!(self.phase, Phase::Setup)
    }

    pub fn in_game(&self) -> bool {
        matches!(self.phase, Phase::Game(_))
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Results)
    }

    fn finish_game(&mut self) {
        self.output.say(&Message::ScoresRecap(self.rankings()));
        self.set_phase(Phase::Results);
    }

    fn rearm_if_playing(&mut self) {
        let settings = self.settings.clone();
        if let Phase::Game(state) = &mut self.phase {
            state.rearm_countdown(&settings);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        debug!("Entering session phase: {}", phase.name());
        self.phase = phase;
    }

    /// Derives the play order from the active level and mode. Mixed mode
    /// reshuffles on every recomputation.
    fn recompute_question_order(&mut self) {
        let mut order: Vec<QuestionRecord> = self
            .bank
            .get(&self.level)
            .map(|questions| {
                questions
                    .iter()
                    .filter(|q| self.settings.mode.keeps(q))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if self.settings.mode == Mode::Mixed {
            order.shuffle(&mut rand::thread_rng());
        }
        self.question_order = order;
    }

    fn persist(&self) {
        let snapshot = Snapshot {
            level: self.level.clone(),
            players: self.players.read().clone(),
            questions_map: self.bank.clone(),
        };
        if let Err(e) = self.store.save(&snapshot) {
            warn!("Could not save state: {:#}", e);
        }
    }
}
