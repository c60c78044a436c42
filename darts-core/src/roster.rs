//! Saved players and their on-disk form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A saved player and whether they are in the current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEntry {
    pub name: String,
    pub in_game: bool,
}

/// Every saved player plus the single selected name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    players: Vec<PlayerEntry>,
    selected: Option<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[PlayerEntry] {
        &self.players
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    /// Add a player by name. Blank names and duplicates are ignored.
    pub fn add_player(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.players.push(PlayerEntry {
            name: name.to_string(),
            in_game: false,
        });
        true
    }

    /// Select a saved player. Unknown names clear the selection.
    pub fn select(&mut self, name: &str) {
        self.selected = self.contains(name).then(|| name.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove the selected player and clear the selection.
    pub fn remove_selected_player(&mut self) -> Option<PlayerEntry> {
        let name = self.selected.take()?;
        let position = self.players.iter().position(|p| p.name == name)?;
        Some(self.players.remove(position))
    }

    /// Flag a player as in or out of the game, adding them when unknown.
    pub fn mark_in_game(&mut self, name: &str, in_game: bool) {
        match self.players.iter_mut().find(|p| p.name == name) {
            Some(entry) => entry.in_game = in_game,
            None if in_game => self.players.push(PlayerEntry {
                name: name.to_string(),
                in_game,
            }),
            None => {}
        }
    }

    /// The shape written to disk.
    pub fn to_file(&self) -> RosterFile {
        RosterFile {
            players: self.players.iter().map(|p| p.name.clone()).collect(),
            selected: self.selected.clone(),
        }
    }

    /// Rebuild from disk. Nobody is in the game after a load, and a selection
    /// that names no loaded player is dropped.
    pub fn from_file(file: RosterFile) -> Self {
        let mut roster = Roster::new();
        for name in &file.players {
            roster.add_player(name);
        }
        if let Some(selected) = file.selected.as_deref().filter(|s| !s.is_empty()) {
            roster.select(selected);
        }
        roster
    }
}

/// On-disk roster: `{"Players": [...], "Selected": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RosterFile {
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub selected: Option<String>,
}

/// Failure reading or writing the roster file.
#[derive(Debug)]
pub enum RosterError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(e) => write!(f, "roster io error: {}", e),
            RosterError::Json(e) => write!(f, "roster format error: {}", e),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(e) => Some(e),
            RosterError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for RosterError {
    fn from(e: io::Error) -> Self {
        RosterError::Io(e)
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Json(e)
    }
}

/// Somewhere a roster can be kept between runs.
pub trait RosterStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<RosterFile>, RosterError>;
    fn save(&self, file: &RosterFile) -> Result<(), RosterError>;
}

/// Pretty-printed JSON file store.
#[derive(Debug, Clone)]
pub struct JsonRosterStore {
    path: PathBuf,
}

impl JsonRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterStore for JsonRosterStore {
    fn load(&self) -> Result<Option<RosterFile>, RosterError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, file: &RosterFile) -> Result<(), RosterError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
