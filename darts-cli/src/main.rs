mod config;
mod render;
mod repl;
mod simulate;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Score a game of darts from the terminal", long_about = None)]
struct Cli {
    /// Roster file (defaults to $DARTS_SCORE_HOME/players.json)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Keep score interactively (default)")]
    Play,
    #[command(about = "Let computer throwers play a few rounds", alias = "sim")]
    Simulate {
        #[arg(long, default_value_t = 10)]
        rounds: usize,
        /// Seed for the random throwers; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    config::init_logging(cli.log_level);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => repl::run(&config::roster_path(cli.roster)),
        Command::Simulate { rounds, seed, json } => {
            simulate::run(rounds, seed.unwrap_or_else(rand::random), json)
        }
    }
}
