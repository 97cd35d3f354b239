//! Report types serialized as JSON.

use serde::Serialize;

/// An add-on loaded by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModInfo {
    pub name: String,
    /// `None` when the log has no `(Version: …)` line for the add-on
    pub version: Option<String>,
}

/// One game session, i.e. the log following a `Loaded 'vehicle' specializations` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub cp_version: String,
    pub map_name: String,
    pub savegame_name: String,
    pub savegame_slot: u32,
    pub mods: Vec<ModInfo>,
}

/// Result of a single log segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SegmentOutcome {
    Parsed(GameSession),
    Skipped { index: usize, reason: String },
}

impl SegmentOutcome {
    #[must_use]
    pub const fn session(&self) -> Option<&GameSession> {
        match self {
            Self::Parsed(session) => Some(session),
            Self::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogReport {
    pub game_version: Option<String>,
    pub segments: Vec<SegmentOutcome>,
}
