//! A scoring session: roster, participants, turn order and undo.

use crate::board::{self, BoardPoint, Hit};
use crate::flags;
use crate::highlight::Highlights;
use crate::ledger::ScoreLedger;
use crate::roster::{PlayerEntry, Roster, RosterFile, RosterStore};
use crate::round::{Participant, RoundHeader, RoundTable};
use crate::turn::{TurnOutcome, TurnState};
use crate::undo::{ThrowReceipt, UndoSlot};
use log::{debug, info, warn};
use std::time::Instant;

/// Owns all scoring state for one sitting at the board.
///
/// Every mutating call runs to completion and leaves the derived display
/// flags consistent with the canonical state.
#[derive(Debug, Clone)]
pub struct Session {
    ledger: ScoreLedger,
    table: RoundTable,
    turn: TurnState,
    undo: UndoSlot,
    roster: Roster,
    selected_participant: Option<String>,
    highlights: Highlights,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn as_delta(points: u32) -> i32 {
    i32::try_from(points).unwrap_or(i32::MAX)
}

impl Session {
    pub fn new() -> Self {
        let mut session = Self {
            ledger: ScoreLedger::new(),
            table: RoundTable::new(),
            turn: TurnState::new(),
            undo: UndoSlot::new(),
            roster: Roster::new(),
            selected_participant: None,
            highlights: Highlights::new(),
        };
        session.table.ensure_capacity(1, 0);
        session.refresh();
        session
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> &[Participant] {
        self.table.participants()
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.table.participant(name)
    }

    pub fn headers(&self) -> &[RoundHeader] {
        self.table.headers()
    }

    pub fn has_participants(&self) -> bool {
        !self.table.is_empty()
    }

    pub fn active_participant(&self) -> Option<&Participant> {
        self.turn.active().and_then(|i| self.table.get(i))
    }

    /// Name of the participant whose turn it is, or "" when nobody is.
    pub fn active_participant_name(&self) -> &str {
        self.active_participant().map_or("", |p| p.name())
    }

    pub fn throws_left(&self) -> u32 {
        self.turn.throws_left()
    }

    pub fn current_round(&self) -> usize {
        self.turn.current_round()
    }

    pub fn throws_this_round(&self) -> usize {
        self.turn.throws_this_round()
    }

    pub fn score(&self, player: &str) -> u32 {
        self.ledger.get(player)
    }

    pub fn selected_participant(&self) -> Option<&str> {
        self.selected_participant.as_deref()
    }

    /// Ledger score of the roster's selected player.
    pub fn selected_player_score(&self) -> u32 {
        self.roster.selected().map_or(0, |name| self.ledger.get(name))
    }

    /// The throw that [`Session::undo_last`] would take back.
    pub fn last_throw(&self) -> Option<&ThrowReceipt> {
        self.undo.peek()
    }

    // ---------------------------------------------------------------------
    // Roster
    // ---------------------------------------------------------------------

    pub fn add_player(&mut self, name: &str) -> bool {
        self.roster.add_player(name)
    }

    pub fn select_player(&mut self, name: &str) {
        self.roster.select(name);
    }

    pub fn remove_selected_player(&mut self) -> Option<PlayerEntry> {
        self.roster.remove_selected_player()
    }

    /// Replace the roster with whatever the store holds. A failed load leaves
    /// an empty roster behind.
    pub fn load_roster(&mut self, store: &dyn RosterStore) {
        match store.load() {
            Ok(Some(file)) => {
                self.roster = Roster::from_file(file);
                for participant in self.table.participants() {
                    self.roster.mark_in_game(participant.name(), true);
                }
                info!("loaded {} saved players", self.roster.players().len());
            }
            Ok(None) => debug!("no saved roster yet"),
            Err(e) => {
                warn!("failed to load roster: {}", e);
                self.roster = Roster::new();
            }
        }
    }

    /// Write the roster out. Failures are logged and reported as `false`.
    pub fn save_roster(&self, store: &dyn RosterStore) -> bool {
        match store.save(&self.roster_file()) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to save roster: {}", e);
                false
            }
        }
    }

    pub fn roster_file(&self) -> RosterFile {
        self.roster.to_file()
    }

    // ---------------------------------------------------------------------
    // Membership
    // ---------------------------------------------------------------------

    /// Bring a player into the game. Adding someone already playing does
    /// nothing.
    pub fn add_participant(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.table.position(name).is_some() {
            return false;
        }
        let round = self.turn.current_round();
        self.ledger.ensure(name);
        self.table.add(name, self.ledger.get(name), round);
        self.roster.mark_in_game(name, true);

        if self.turn.ensure_active(self.table.len()) {
            self.follow_active();
        }
        self.table.ensure_capacity(round + 1, round);
        self.refresh();
        info!("{} joined the game", name);
        true
    }

    pub fn remove_participant(&mut self, name: &str) -> bool {
        let Some((position, removed)) = self.table.remove(name) else {
            return false;
        };
        self.roster.mark_in_game(removed.name(), false);
        self.highlights.forget(removed.name());
        if self.selected_participant.as_deref() == Some(removed.name()) {
            self.selected_participant = None;
        }
        self.turn.participant_removed(position, self.table.len());
        self.refresh();
        info!("{} left the game", removed.name());
        true
    }

    /// Make a participant the active one, e.g. when picked from a list.
    pub fn select_participant(&mut self, name: &str) -> bool {
        let Some(position) = self.table.position(name) else {
            return false;
        };
        self.turn.select(position);
        self.follow_active();
        self.refresh();
        true
    }

    // ---------------------------------------------------------------------
    // Play
    // ---------------------------------------------------------------------

    /// Apply a signed delta to a player's aggregate score, outside the turn
    /// flow. Participants see the change in their score and round mirrors.
    pub fn adjust_score(&mut self, player: &str, delta: i32) {
        let Some(total) = self.ledger.adjust(player, delta) else {
            return;
        };
        if let Some(participant) = self.table.participant_mut(player) {
            participant.score = total;
            participant.round_score = participant.round_score.saturating_add_signed(delta);
        }
    }

    /// Record one dart for `player`.
    ///
    /// A throw for someone other than the active participant only changes the
    /// ledger. Returns the receipt needed to undo it, or `None` when nothing
    /// happened.
    pub fn record_throw(&mut self, player: &str, points: u32) -> Option<ThrowReceipt> {
        if player.is_empty() || self.table.is_empty() {
            return None;
        }
        let snapshot = self.turn.snapshot();
        let delta = as_delta(points);
        self.adjust_score(player, delta);

        if let Some(position) = self.active_position_for(player) {
            let round = self.turn.current_round();
            self.table.ensure_capacity(round + 1, round);
            self.table.resolve_entry(position, round);
            if let Some(value) = self.table.add_to_entry(position, round, delta) {
                if let Some(participant) = self.table.participants_mut().get_mut(position) {
                    participant.round_score = value;
                }
            }
            self.turn.count_throw();
            let outcome = self.turn.consume_throw(self.table.len());
            self.after_turn(outcome);
        } else {
            debug!("off-turn throw of {} for {}", points, player);
        }
        self.refresh();

        let receipt = ThrowReceipt {
            snapshot,
            player: player.to_string(),
            points,
        };
        self.undo.store(receipt.clone());
        Some(receipt)
    }

    /// End the active participant's turn early. Unused darts count as
    /// thrown for zero points.
    pub fn advance_turn_manually(&mut self) -> TurnOutcome {
        if self.table.is_empty() {
            return TurnOutcome::default();
        }
        if let Some(position) = self.valid_active_position() {
            if self.turn.throws_left() > 0 {
                let round = self.turn.current_round();
                self.table.ensure_capacity(round + 1, round);
                if let Some(value) = self.table.resolve_entry(position, round) {
                    if let Some(participant) = self.table.participants_mut().get_mut(position) {
                        participant.round_score = value;
                    }
                }
                let forfeited = self.turn.forfeit_remaining();
                debug!("{} darts forfeited", forfeited);
            }
        }
        let outcome = self.turn.complete_turn(self.table.len());
        self.after_turn(outcome);
        self.refresh();
        outcome
    }

    /// Take back a throw described by `receipt`.
    ///
    /// Only the most recent receipt restores a consistent state. The four
    /// scheduler scalars go back verbatim; round capacity grown since the
    /// throw stays.
    pub fn undo(&mut self, receipt: &ThrowReceipt) {
        let delta = as_delta(receipt.points);
        self.adjust_score(&receipt.player, -delta);
        self.turn.restore(receipt.snapshot);
        if self.valid_active_position().is_some() {
            self.follow_active();
        }
        if let Some(position) = self.table.position(&receipt.player) {
            self.table
                .add_to_entry(position, self.turn.current_round(), -delta);
        }
        if self.undo.peek() == Some(receipt) {
            self.undo.clear();
        }
        self.refresh();
        debug!("undid {} for {}", receipt.points, receipt.player);
    }

    /// Undo the most recent throw, once. Returns false when there is nothing
    /// left to undo.
    pub fn undo_last(&mut self) -> bool {
        match self.undo.take() {
            Some(receipt) => {
                self.undo(&receipt);
                true
            }
            None => false,
        }
    }

    /// Who a board hit counts for: the selected participant, else the active
    /// one, else the roster's selected player.
    pub fn throw_target(&self) -> Option<String> {
        self.selected_participant
            .as_deref()
            .filter(|name| self.table.position(name).is_some())
            .or_else(|| Some(self.active_participant_name()).filter(|n| !n.is_empty()))
            .or_else(|| self.roster.selected())
            .map(str::to_string)
    }

    /// Score a board position and record it for [`Session::throw_target`].
    pub fn record_hit(&mut self, point: BoardPoint) -> Option<(Hit, ThrowReceipt)> {
        let hit = board::score(point);
        let target = self.throw_target()?;
        let receipt = self.record_throw(&target, hit.points())?;
        Some((hit, receipt))
    }

    // ---------------------------------------------------------------------
    // Highlight
    // ---------------------------------------------------------------------

    /// Briefly highlight whoever is up next.
    pub fn highlight_active(&mut self, now: Instant) {
        let Some(position) = self.valid_active_position() else {
            return;
        };
        if let Some(participant) = self.table.participants_mut().get_mut(position) {
            participant.is_highlighted = true;
            self.highlights.start(participant.name(), now);
        }
    }

    /// Clear highlights whose time is up. Returns the names that changed.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let expired = self.highlights.expire(now);
        for name in &expired {
            if let Some(participant) = self.table.participant_mut(name) {
                participant.is_highlighted = false;
            }
        }
        expired
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn valid_active_position(&self) -> Option<usize> {
        self.turn.active().filter(|&i| i < self.table.len())
    }

    fn active_position_for(&self, player: &str) -> Option<usize> {
        self.valid_active_position()
            .filter(|&i| self.table.get(i).is_some_and(|p| p.name() == player))
    }

    /// Keep both selections pointing at the active participant.
    fn follow_active(&mut self) {
        let name = self.active_participant_name().to_string();
        if name.is_empty() {
            return;
        }
        self.roster.select(&name);
        self.selected_participant = Some(name);
    }

    fn after_turn(&mut self, outcome: TurnOutcome) {
        if outcome.turn_passed {
            self.follow_active();
            debug!("turn passes to {}", self.active_participant_name());
        }
        if outcome.round_completed {
            let round = self.turn.current_round();
            self.table.ensure_capacity(round + 1, round);
            debug!("round {} begins", round + 1);
        }
    }

    fn refresh(&mut self) {
        flags::project(&mut self.table, &self.turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::THROWS_PER_TURN;

    fn session_with(names: &[&str]) -> Session {
        let mut session = Session::new();
        for name in names {
            session.add_participant(name);
        }
        session
    }

    #[test]
    fn new_session_has_one_round_header() {
        let session = Session::new();
        assert_eq!(session.headers().len(), 1);
        assert!(session.headers()[0].is_current());
        assert_eq!(session.active_participant_name(), "");
    }

    #[test]
    fn first_participant_becomes_active() {
        let session = session_with(&["anna", "bert"]);
        assert_eq!(session.active_participant_name(), "anna");
        assert_eq!(session.throws_left(), THROWS_PER_TURN);
        assert_eq!(session.selected_participant(), Some("anna"));
        assert!(session.participants()[0].is_active());
        assert!(session.roster().players().iter().all(|p| p.in_game));
    }

    #[test]
    fn add_participant_is_idempotent() {
        let mut session = session_with(&["anna"]);
        assert!(!session.add_participant("anna"));
        assert!(!session.add_participant("  "));
        assert_eq!(session.participants().len(), 1);
    }

    #[test]
    fn participant_inherits_ledger_score() {
        let mut session = session_with(&["anna"]);
        session.record_throw("anna", 20);
        session.remove_participant("anna");
        session.add_participant("anna");
        assert_eq!(session.participant("anna").unwrap().score(), 20);
    }

    #[test]
    fn three_throws_pass_the_turn() {
        let mut session = session_with(&["anna", "bert"]);
        for _ in 0..3 {
            session.record_throw("anna", 20);
        }
        assert_eq!(session.active_participant_name(), "bert");
        assert_eq!(session.throws_left(), THROWS_PER_TURN);
        assert_eq!(session.current_round(), 0);
        assert_eq!(session.selected_participant(), Some("bert"));
    }

    #[test]
    fn off_turn_throw_only_touches_ledger() {
        let mut session = session_with(&["anna", "bert"]);
        let receipt = session.record_throw("bert", 25).unwrap();

        assert_eq!(session.score("bert"), 25);
        assert_eq!(session.throws_left(), THROWS_PER_TURN);
        assert_eq!(session.throws_this_round(), 0);
        assert_eq!(session.participant("bert").unwrap().rounds()[0].value(), 0);
        assert_eq!(receipt.snapshot, session.turn().snapshot());
    }

    #[test]
    fn throw_without_participants_is_ignored() {
        let mut session = Session::new();
        assert!(session.record_throw("anna", 20).is_none());
        assert_eq!(session.score("anna"), 0);

        let mut session = session_with(&["anna"]);
        assert!(session.record_throw("", 20).is_none());
    }

    #[test]
    fn zero_point_throw_reveals_cell() {
        let mut session = session_with(&["anna", "bert"]);
        session.record_throw("anna", 0);
        let cell = &session.participant("anna").unwrap().rounds()[0];
        assert!(!cell.is_future());
        assert_eq!(cell.cumulative_total(), Some(0));
    }

    #[test]
    fn manual_advance_on_empty_session_is_noop() {
        let mut session = Session::new();
        assert_eq!(session.advance_turn_manually(), TurnOutcome::default());
        assert_eq!(session.turn().active(), None);
    }

    #[test]
    fn manual_advance_passes_to_next() {
        let mut session = session_with(&["anna", "bert"]);
        session.record_throw("anna", 5);
        let outcome = session.advance_turn_manually();

        assert!(outcome.turn_passed);
        assert!(!outcome.round_completed);
        assert_eq!(session.active_participant_name(), "bert");
        assert_eq!(session.throws_this_round(), 3);
    }

    #[test]
    fn undo_last_only_once() {
        let mut session = session_with(&["anna"]);
        session.record_throw("anna", 60);
        assert!(session.undo_last());
        assert!(!session.undo_last());
        assert_eq!(session.score("anna"), 0);
        assert_eq!(session.throws_left(), THROWS_PER_TURN);
    }

    #[test]
    fn explicit_undo_clears_matching_slot() {
        let mut session = session_with(&["anna"]);
        let receipt = session.record_throw("anna", 60).unwrap();
        session.undo(&receipt);
        assert!(session.last_throw().is_none());
    }

    #[test]
    fn adjust_score_updates_mirrors_with_floor() {
        let mut session = session_with(&["anna"]);
        session.adjust_score("anna", 30);
        session.adjust_score("anna", -50);
        let anna = session.participant("anna").unwrap();
        assert_eq!(anna.score(), 0);
        assert_eq!(anna.round_score(), 0);
        session.adjust_score("", 10);
    }

    #[test]
    fn throw_target_prefers_selected_participant() {
        let mut session = Session::new();
        session.add_player("zed");
        session.select_player("zed");
        assert_eq!(session.throw_target().as_deref(), Some("zed"));

        session.add_participant("anna");
        session.add_participant("bert");
        assert_eq!(session.throw_target().as_deref(), Some("anna"));

        session.select_participant("bert");
        assert_eq!(session.throw_target().as_deref(), Some("bert"));
        assert_eq!(session.active_participant_name(), "bert");
    }

    #[test]
    fn record_hit_scores_the_board() {
        let mut session = session_with(&["anna"]);
        let (hit, receipt) = session
            .record_hit(BoardPoint::aim_at(20, board::Ring::Triple))
            .unwrap();
        assert_eq!(hit.points(), 60);
        assert_eq!(receipt.player, "anna");
        assert_eq!(session.score("anna"), 60);
    }

    #[test]
    fn highlight_clears_after_tick() {
        let start = Instant::now();
        let mut session = session_with(&["anna"]);
        session.highlight_active(start);
        assert!(session.participant("anna").unwrap().is_highlighted());

        let cleared = session.tick(start + crate::highlight::HIGHLIGHT_DURATION);
        assert_eq!(cleared, ["anna"]);
        assert!(!session.participant("anna").unwrap().is_highlighted());
    }

    #[test]
    fn removed_participant_highlight_is_inert() {
        let start = Instant::now();
        let mut session = session_with(&["anna", "bert"]);
        session.highlight_active(start);
        session.remove_participant("anna");
        assert!(session
            .tick(start + crate::highlight::HIGHLIGHT_DURATION)
            .is_empty());
    }

    #[test]
    fn remove_participant_unmarks_roster() {
        let mut session = session_with(&["anna", "bert"]);
        session.remove_participant("anna");
        let anna = session
            .roster()
            .players()
            .iter()
            .find(|p| p.name == "anna")
            .unwrap();
        assert!(!anna.in_game);
        assert_eq!(session.active_participant_name(), "bert");
    }
}
