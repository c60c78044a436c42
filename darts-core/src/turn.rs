//! Turn and round scheduling.
//!
//! The scheduler only knows counts and indices. It never looks at names or
//! scores; the session feeds it the number of participants and applies the
//! reported outcome to the round table.

use serde::{Deserialize, Serialize};

/// Darts each participant throws per turn.
pub const THROWS_PER_TURN: u32 = 3;

/// The four scalar fields needed to put the scheduler back where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub active: Option<usize>,
    pub throws_left: u32,
    pub round: usize,
    pub throws_this_round: usize,
}

/// What a turn step changed, so the caller can grow the table and log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn_passed: bool,
    pub round_completed: bool,
}

/// Whose turn it is, how many darts remain and which round is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    active: Option<usize>,
    throws_left: u32,
    current_round: usize,
    throws_this_round: usize,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            active: None,
            throws_left: 0,
            current_round: 0,
            throws_this_round: 0,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn throws_left(&self) -> u32 {
        self.throws_left
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn throws_this_round(&self) -> usize {
        self.throws_this_round
    }

    /// Throws that must be recorded before the current round completes.
    pub fn round_length(participant_count: usize) -> usize {
        participant_count * THROWS_PER_TURN as usize
    }

    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            active: self.active,
            throws_left: self.throws_left,
            round: self.current_round,
            throws_this_round: self.throws_this_round,
        }
    }

    /// Put all four scalars back verbatim.
    pub fn restore(&mut self, snapshot: TurnSnapshot) {
        self.active = snapshot.active;
        self.throws_left = snapshot.throws_left;
        self.current_round = snapshot.round;
        self.throws_this_round = snapshot.throws_this_round;
    }

    /// Give the first participant a full turn when nobody is active yet.
    pub fn ensure_active(&mut self, participant_count: usize) -> bool {
        if self.active.is_some() || participant_count == 0 {
            return false;
        }
        self.active = Some(0);
        self.throws_left = THROWS_PER_TURN;
        true
    }

    /// Hand the turn to a specific participant.
    pub fn select(&mut self, position: usize) {
        self.active = Some(position);
        if self.throws_left == 0 {
            self.throws_left = THROWS_PER_TURN;
        }
    }

    /// A throw landed in the active participant's round cell.
    pub fn count_throw(&mut self) {
        self.throws_this_round += 1;
    }

    /// Spend one dart of the active turn, passing the turn on the last one.
    pub fn consume_throw(&mut self, participant_count: usize) -> TurnOutcome {
        self.throws_left = self.throws_left.saturating_sub(1);
        if self.throws_left == 0 && participant_count > 0 {
            self.complete_turn(participant_count)
        } else {
            TurnOutcome::default()
        }
    }

    /// Count the darts left in this turn as thrown for zero points.
    ///
    /// Returns how many darts were forfeited.
    pub fn forfeit_remaining(&mut self) -> u32 {
        let remaining = self.throws_left;
        self.throws_this_round += remaining as usize;
        self.throws_left = 0;
        remaining
    }

    /// Pass the turn to the next participant and close the round once every
    /// participant has thrown a full turn.
    pub fn complete_turn(&mut self, participant_count: usize) -> TurnOutcome {
        if participant_count == 0 {
            return TurnOutcome::default();
        }
        let next = self.active.map_or(0, |i| (i + 1) % participant_count);
        self.active = Some(next);
        self.throws_left = THROWS_PER_TURN;

        let mut outcome = TurnOutcome {
            turn_passed: true,
            round_completed: false,
        };
        if self.throws_this_round >= Self::round_length(participant_count) {
            self.throws_this_round = 0;
            self.current_round += 1;
            outcome.round_completed = true;
        }
        outcome
    }

    /// Keep the same participant active after someone leaves the list.
    pub fn participant_removed(&mut self, position: usize, remaining: usize) {
        if remaining == 0 {
            self.active = None;
            self.throws_left = 0;
            return;
        }
        if let Some(active) = self.active {
            if position < active {
                self.active = Some(active - 1);
            } else if active >= remaining {
                self.active = Some(0);
            }
        }
    }
}
