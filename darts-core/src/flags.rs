//! Derived display flags.
//!
//! Every flag on headers, participants and round cells is a function of the
//! turn state and the canonical cell values. Call [`project`] after anything
//! that touches either.

use crate::round::RoundTable;
use crate::turn::TurnState;

/// Whether a cell should still be hidden from the running total.
pub fn is_future(index: usize, current_round: usize, value: u32, resolved: bool) -> bool {
    !(index < current_round || (index == current_round && (value > 0 || resolved)))
}

/// Recompute every derived flag and cached total from canonical state.
pub fn project(table: &mut RoundTable, turn: &TurnState) {
    let current = turn.current_round();
    let active = turn.active();

    for (index, header) in table.headers_mut().iter_mut().enumerate() {
        header.is_current = index == current;
        header.is_past = index < current;
    }

    for (position, participant) in table.participants_mut().iter_mut().enumerate() {
        let is_active = active == Some(position);
        participant.is_active = is_active;
        for entry in participant.rounds_mut() {
            let index = entry.index();
            entry.is_current = index == current;
            entry.is_future = is_future(index, current, entry.value(), entry.is_resolved());
            entry.is_active_cell = is_active && index == current;
        }
        participant.refresh_totals_from(0);
    }
}
