//! Game log analysis for bug reports.
//!
//! Recovers the game version from the log header and, per game session, the
//! Courseplay version, map, savegame and loaded add-ons.
mod error;
mod extractor;
mod model;

pub use error::LogInfoError;
pub use extractor::{
    LogExtractor,
    SESSION_MARKER,
    extract_log_info,
    write_report,
};
pub use model::{
    GameSession,
    LogReport,
    ModInfo,
    SegmentOutcome,
};
