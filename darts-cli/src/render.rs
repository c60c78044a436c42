//! Terminal drawing of the score table.

use colored::{ColoredString, Colorize};
use darts_core::round::{Participant, RoundHeader, RoundScoreEntry};
use darts_core::Session;

const NAME_WIDTH: usize = 14;
const CELL_WIDTH: usize = 6;

fn header_cell(header: &RoundHeader) -> ColoredString {
    let label = format!("{:>width$}", format!("R{}", header.number), width = CELL_WIDTH);
    if header.is_current() {
        label.as_str().black().on_green()
    } else if header.is_past() {
        label.as_str().dimmed()
    } else {
        label.as_str().normal()
    }
}

fn round_cell(entry: &RoundScoreEntry) -> ColoredString {
    let text = format!("{:>width$}", entry.display_total(), width = CELL_WIDTH);
    if entry.is_active_cell() {
        text.as_str().black().on_green()
    } else if entry.is_current() {
        text.as_str().black().on_yellow()
    } else if !entry.is_future() {
        text.as_str().dimmed()
    } else {
        text.as_str().normal()
    }
}

fn name_cell(participant: &Participant) -> ColoredString {
    let marker = if participant.is_active() { ">" } else { " " };
    let text = format!("{} {:<width$}", marker, participant.name(), width = NAME_WIDTH);
    if participant.highlight_state() {
        text.as_str().bold()
    } else {
        text.as_str().normal()
    }
}

/// The whole table plus the turn line, ready to print.
pub fn table(session: &Session) -> String {
    let mut s = String::new();
    s.push_str(&format!("  {:<width$}{:>7}", "player", "score", width = NAME_WIDTH));
    for header in session.headers() {
        s.push_str(&header_cell(header).to_string());
    }
    s.push('\n');

    for participant in session.participants() {
        s.push_str(&name_cell(participant).to_string());
        s.push_str(&format!("{:>7}", participant.score()));
        for entry in participant.rounds() {
            s.push_str(&round_cell(entry).to_string());
        }
        s.push('\n');
    }

    s.push('\n');
    s.push_str(&status(session));
    s.push('\n');
    s
}

/// One line saying whose turn it is.
pub fn status(session: &Session) -> String {
    if !session.has_participants() {
        return "no players in the game yet, `join <name>` to start".to_string();
    }
    format!(
        "round {} | {} to throw | {} darts left | round score {}",
        session.current_round() + 1,
        session.active_participant_name(),
        session.throws_left(),
        session
            .active_participant()
            .map_or(0, |p| p.round_score()),
    )
}
