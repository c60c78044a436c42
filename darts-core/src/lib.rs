pub mod board;
pub mod flags;
pub mod highlight;
pub mod ledger;
pub mod roster;
pub mod round;
pub mod session;
pub mod turn;
pub mod undo;

pub use board::{BoardPoint, Hit, Ring};
pub use session::Session;
pub use turn::{TurnOutcome, TurnSnapshot, THROWS_PER_TURN};
pub use undo::ThrowReceipt;

use serde::Serialize;

/// What a thrower gets to see before each dart.
pub struct ThrowContext {
    pub round: usize,
    pub throws_left: u32,
    pub score: u32,
}

/// Anything that can step up to the board and aim a dart.
pub trait Thrower {
    fn name(&self) -> &str;
    fn aim(&mut self, ctx: &ThrowContext) -> BoardPoint;
}

/// One completed round: every participant's points for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    pub scores: Vec<(String, u32)>,
}

/// Results of a simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub rounds: Vec<RoundSummary>,
    pub standings: Vec<(String, u32)>,
    pub darts_thrown: usize,
}

/// Play `rounds` full rounds with the given throwers and report the outcome.
///
/// Each thrower joins as a participant under its own name and throws only on
/// its own turn.
pub fn simulate_rounds(throwers: &mut [Box<dyn Thrower>], rounds: usize) -> GameReport {
    let mut session = Session::new();
    for thrower in throwers.iter() {
        session.add_participant(thrower.name());
    }

    let mut darts_thrown = 0;
    while session.has_participants() && session.current_round() < rounds {
        let active = session.active_participant_name().to_string();
        let Some(thrower) = throwers.iter_mut().find(|t| t.name() == active) else {
            break;
        };
        let ctx = ThrowContext {
            round: session.current_round(),
            throws_left: session.throws_left(),
            score: session.score(&active),
        };
        let point = thrower.aim(&ctx);
        if session.record_hit(point).is_none() {
            break;
        }
        darts_thrown += 1;
    }

    let played = session.current_round().min(rounds);
    let rounds = (0..played)
        .map(|round| RoundSummary {
            round: round + 1,
            scores: session
                .participants()
                .iter()
                .map(|p| (p.name().to_string(), p.round(round).map_or(0, |e| e.value())))
                .collect(),
        })
        .collect();

    GameReport {
        rounds,
        standings: session.ledger().standings(),
        darts_thrown,
    }
}
