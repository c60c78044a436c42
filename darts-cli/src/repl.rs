//! The interactive scoring loop.

use crate::render;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use darts_core::board::SECTORS;
use darts_core::roster::{JsonRosterStore, RosterFile, RosterStore};
use darts_core::{BoardPoint, Ring, Session};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum LineCommand {
    #[command(about = "Save a player to the roster")]
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Select a saved player")]
    Pick {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Delete the selected player from the roster")]
    Forget,
    #[command(about = "Bring a player into the game")]
    Join {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Take a player out of the game")]
    Leave {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Hand the turn to a participant")]
    Select {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Record points for the player up (or --player)", alias = "t")]
    Throw {
        points: u32,
        #[arg(long)]
        player: Option<String>,
    },
    #[command(about = "Record a hit on a named segment", alias = "h")]
    Hit {
        #[arg(value_enum)]
        ring: RingArg,
        #[arg(default_value_t = 20)]
        sector: u32,
    },
    #[command(about = "Record a hit at board coordinates (radius units)")]
    Tap {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    #[command(about = "Give a score correction outside the turn order")]
    Adjust {
        player: String,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    #[command(about = "End the current turn early", alias = "n")]
    Next,
    #[command(about = "Take back the last throw", alias = "u")]
    Undo,
    #[command(about = "Show the score table", alias = "s")]
    Show,
    #[command(about = "Leave the program", alias = "exit")]
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RingArg {
    Single,
    Double,
    Triple,
    Bull,
    Bullseye,
    Miss,
}

impl From<RingArg> for Ring {
    fn from(ring: RingArg) -> Self {
        match ring {
            RingArg::Single => Ring::Single,
            RingArg::Double => Ring::Double,
            RingArg::Triple => Ring::Triple,
            RingArg::Bull => Ring::OuterBull,
            RingArg::Bullseye => Ring::InnerBull,
            RingArg::Miss => Ring::Miss,
        }
    }
}

enum Flow {
    Continue(String),
    Quit,
}

fn parse(line: &str) -> Result<LineCommand, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

fn joined(words: &[String]) -> String {
    words.join(" ")
}

/// Apply one command to the session and describe what happened.
fn apply(session: &mut Session, command: LineCommand, now: Instant) -> Flow {
    let message = match command {
        LineCommand::Add { name } => {
            let name = joined(&name);
            if session.add_player(&name) {
                format!("saved {}", name)
            } else {
                format!("{} is already saved", name)
            }
        }
        LineCommand::Pick { name } => {
            let name = joined(&name);
            session.select_player(&name);
            match session.roster().selected() {
                Some(selected) => format!(
                    "selected {} ({})",
                    selected,
                    session.selected_player_score()
                ),
                None => format!("{} is not a saved player", name),
            }
        }
        LineCommand::Forget => match session.remove_selected_player() {
            Some(entry) => format!("forgot {}", entry.name),
            None => "no player selected".to_string(),
        },
        LineCommand::Join { name } => {
            let name = joined(&name);
            if session.add_participant(&name) {
                render::table(session)
            } else {
                format!("{} is already playing", name)
            }
        }
        LineCommand::Leave { name } => {
            let name = joined(&name);
            if session.remove_participant(&name) {
                render::table(session)
            } else {
                format!("{} is not playing", name)
            }
        }
        LineCommand::Select { name } => {
            let name = joined(&name);
            if session.select_participant(&name) {
                render::status(session)
            } else {
                format!("{} is not playing", name)
            }
        }
        LineCommand::Throw { points, player } => {
            let target = player.or_else(|| session.throw_target());
            match target.and_then(|player| session.record_throw(&player, points)) {
                Some(receipt) => {
                    session.highlight_active(now);
                    format!(
                        "{} for {}\n{}",
                        receipt.points,
                        receipt.player,
                        render::table(session)
                    )
                }
                None => "nobody to score for".to_string(),
            }
        }
        LineCommand::Hit { ring, sector } => {
            let ring = Ring::from(ring);
            let numbered = matches!(ring, Ring::Single | Ring::Double | Ring::Triple);
            if numbered && !SECTORS.contains(&sector) {
                format!("there is no sector {} on the board", sector)
            } else {
                record_point(session, BoardPoint::aim_at(sector, ring), now)
            }
        }
        LineCommand::Tap { x, y } => record_point(session, BoardPoint::new(x, y), now),
        LineCommand::Adjust { player, delta } => {
            session.adjust_score(&player, delta);
            format!("{} now has {}", player, session.score(&player))
        }
        LineCommand::Next => {
            let outcome = session.advance_turn_manually();
            if outcome.turn_passed {
                render::table(session)
            } else {
                "nobody is playing".to_string()
            }
        }
        LineCommand::Undo => {
            if session.undo_last() {
                render::table(session)
            } else {
                "nothing to undo".to_string()
            }
        }
        LineCommand::Show => render::table(session),
        LineCommand::Quit => return Flow::Quit,
    };
    Flow::Continue(message)
}

fn record_point(session: &mut Session, point: BoardPoint, now: Instant) -> String {
    match session.record_hit(point) {
        Some((hit, receipt)) => {
            session.highlight_active(now);
            format!("{} for {}\n{}", hit, receipt.player, render::table(session))
        }
        None => "nobody to score for".to_string(),
    }
}

/// Run the loop on stdin until `quit` or end of input.
pub fn run(roster_path: &Path) -> anyhow::Result<()> {
    let store = JsonRosterStore::new(roster_path);
    let mut session = Session::new();
    session.load_roster(&store);
    log::info!("roster file: {}", store.path().display());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render::status(&session))?;
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        let now = Instant::now();
        session.tick(now);
        if line.trim().is_empty() {
            prompt(&mut stdout)?;
            continue;
        }

        let roster_before = session.roster_file();
        let command = match parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "{}", e.render())?;
                prompt(&mut stdout)?;
                continue;
            }
        };
        let flow = apply(&mut session, command, now);
        save_if_changed(&session, &roster_before, &store);
        match flow {
            Flow::Continue(message) => writeln!(stdout, "{}", message)?,
            Flow::Quit => break,
        }
        prompt(&mut stdout)?;
    }
    Ok(())
}

/// Write the roster out when a command changed it. Returns whether a save
/// was attempted.
fn save_if_changed(session: &Session, before: &RosterFile, store: &dyn RosterStore) -> bool {
    if session.roster_file() == *before {
        return false;
    }
    session.save_roster(store);
    true
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use darts_core::roster::RosterError;
    use darts_core::THROWS_PER_TURN;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStore {
        saves: RefCell<Vec<RosterFile>>,
    }

    impl RosterStore for MemoryStore {
        fn load(&self) -> Result<Option<RosterFile>, RosterError> {
            Ok(self.saves.borrow().last().cloned())
        }

        fn save(&self, file: &RosterFile) -> Result<(), RosterError> {
            self.saves.borrow_mut().push(file.clone());
            Ok(())
        }
    }

    /// Apply each line the way `run` does and report the store's save count.
    fn saves_after(session: &mut Session, store: &MemoryStore, lines: &[&str]) -> Vec<usize> {
        let now = Instant::now();
        lines
            .iter()
            .map(|line| {
                let before = session.roster_file();
                apply(session, parse(line).unwrap(), now);
                save_if_changed(session, &before, store);
                store.saves.borrow().len()
            })
            .collect()
    }

    fn run_lines(session: &mut Session, lines: &[&str]) -> Vec<String> {
        let now = Instant::now();
        lines
            .iter()
            .map(|line| match apply(session, parse(line).unwrap(), now) {
                Flow::Continue(message) => message,
                Flow::Quit => "quit".to_string(),
            })
            .collect()
    }

    #[test]
    fn parses_multi_word_names() {
        assert_eq!(
            parse("join Phil The Power").unwrap(),
            LineCommand::Join {
                name: vec!["Phil".into(), "The".into(), "Power".into()]
            }
        );
    }

    #[test]
    fn parses_negative_coordinates_and_aliases() {
        assert_eq!(
            parse("tap -0.1 0.5").unwrap(),
            LineCommand::Tap { x: -0.1, y: 0.5 }
        );
        assert_eq!(parse("u").unwrap(), LineCommand::Undo);
        assert_eq!(
            parse("hit triple 19").unwrap(),
            LineCommand::Hit {
                ring: RingArg::Triple,
                sector: 19
            }
        );
        assert!(parse("throw lots").is_err());
    }

    #[test]
    fn plays_a_short_game() {
        let mut session = Session::new();
        let out = run_lines(
            &mut session,
            &["join anna", "join bert", "hit triple", "throw 20", "hit bullseye"],
        );
        assert!(out[2].starts_with("20 x3 for anna"));
        assert!(out[4].starts_with("Bull (50) for anna"));
        assert_eq!(session.score("anna"), 130);
        assert_eq!(session.active_participant_name(), "bert");

        run_lines(&mut session, &["undo"]);
        assert_eq!(session.score("anna"), 80);
        assert_eq!(session.active_participant_name(), "anna");
    }

    #[test]
    fn roster_commands_manage_saved_players() {
        let mut session = Session::new();
        let out = run_lines(&mut session, &["add anna", "add anna", "pick anna", "forget"]);
        assert_eq!(out[0], "saved anna");
        assert_eq!(out[1], "anna is already saved");
        assert_eq!(out[2], "selected anna (0)");
        assert_eq!(out[3], "forgot anna");
        assert!(session.roster().players().is_empty());
    }

    #[test]
    fn next_and_quit() {
        let mut session = Session::new();
        let out = run_lines(&mut session, &["next", "join anna", "next", "quit"]);
        assert_eq!(out[0], "nobody is playing");
        assert_eq!(session.current_round(), 1);
        assert_eq!(out[3], "quit");
    }

    #[test]
    fn roster_is_saved_only_when_it_changes() {
        let mut session = Session::new();
        let store = MemoryStore::default();
        let counts = saves_after(
            &mut session,
            &store,
            &[
                "add anna",
                "add anna",
                "show",
                "pick anna",
                "pick anna",
                "join bert",
                "throw 20",
                "forget",
            ],
        );
        assert_eq!(counts, [1, 1, 1, 2, 2, 3, 3, 4]);

        let last = store.saves.borrow().last().cloned().unwrap();
        assert_eq!(last, session.roster_file());
        assert_eq!(last.players.len(), 1);
    }

    #[test]
    fn hit_rejects_unknown_sector() {
        let mut session = Session::new();
        let out = run_lines(&mut session, &["join anna", "hit single 25", "hit bull 25"]);
        assert_eq!(out[1], "there is no sector 25 on the board");
        assert_eq!(session.score("anna"), 25);
        assert_eq!(session.throws_left(), THROWS_PER_TURN - 1);
    }
}
