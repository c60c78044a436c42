//! Where things live and how loud the logs are.

use log::LevelFilter;
use std::env;
use std::path::PathBuf;

/// Directory override for the roster file.
pub const HOME_VAR: &str = "DARTS_SCORE_HOME";

const ROSTER_FILE: &str = "players.json";
const APP_DIR: &str = ".dartsScore";

/// Install the logger. `RUST_LOG` wins over the command-line level.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Roster path: explicit flag, then `$DARTS_SCORE_HOME`, then
/// `$HOME/.dartsScore`, then the working directory.
pub fn roster_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    let dir = env::var_os(HOME_VAR)
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from(APP_DIR));
    dir.join(ROSTER_FILE)
}
