//! Regex based extraction of versions, savegame and add-ons from a game log.

use std::fs::{
    self,
    File,
};
use std::io::{
    BufWriter,
    Write,
};
use std::path::Path;

use regex::Regex;

use super::error::LogInfoError;
use super::model::{
    GameSession,
    LogReport,
    ModInfo,
    SegmentOutcome,
};

/// `2021-01-02 10:00`
const TIME: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}\s*";
/// `2021-01-02 10:00:15 [info lp1] `
const SCRIPT_LOG_PREFIX: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}\s*:\d{2}\s*\[\w+\s*lp\d*\]\s*";
/// Four dot separated parts, e.g. `6.3.0.1`
const VERSION: &str = r"\w+\.\w+\.\w+\.\w+";

/// Splits the log into game sessions.
pub const SESSION_MARKER: &str = "Loaded 'vehicle' specializations";

/// Lines before the system information block of the header.
const HEADER_PREAMBLE_LINES: usize = 3;

/// Compiled log patterns.
#[derive(Debug, Clone)]
pub struct LogExtractor {
    timestamp: Regex,
    version: Regex,
    cp_version: Regex,
    savegame: Regex,
    savegame_slot: Regex,
    load_mod: Regex,
}

impl LogExtractor {
    /// # Errors
    /// Returns the regex error if a pattern does not compile.
    pub fn new() -> Result<Self, LogInfoError> {
        Ok(Self {
            timestamp: Regex::new(&format!("(?m)^{TIME}"))?,
            version: Regex::new(VERSION)?,
            cp_version: Regex::new(&format!(
                r"{SCRIPT_LOG_PREFIX}Current mod name: \w+, Current version: ({VERSION}),"
            ))?,
            savegame: Regex::new(&format!(
                r"{SCRIPT_LOG_PREFIX}.*Map loaded:\s(.+?),\s*Savegame name:\s(.+)"
            ))?,
            savegame_slot: Regex::new(r"\((\d+)\)")?,
            load_mod: Regex::new(r"Load mod:\s(\w+)")?,
        })
    }

    /// Extracts the game version and one outcome per session of `log`.
    ///
    /// # Errors
    /// Returns an error only if an add-on version pattern cannot be built.
    pub fn extract(&self, log: &str) -> Result<LogReport, LogInfoError> {
        let game_version = self.game_version(log);
        if game_version.is_none() {
            tracing::warn!("No game version found in the log header");
        }

        let segments = log
            .split(SESSION_MARKER)
            .skip(1)
            .enumerate()
            .map(|(index, segment)| self.parse_segment(index, segment, log))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LogReport { game_version, segments })
    }

    /// Version of the `Farming Simulator` block in the log header.
    ///
    /// The header ends at the first timestamped line. The block is the
    /// `Farming Simulator` line and the indented lines following it.
    #[must_use]
    pub fn game_version(&self, log: &str) -> Option<String> {
        let header_end = self.timestamp.find(log)?.start();
        let header = log.get(..header_end)?;
        let lines: Vec<&str> = header.lines().skip(HEADER_PREAMBLE_LINES).collect();

        let start = lines.iter().rposition(|line| line.starts_with("Farming Simulator"))?;
        let block = lines
            .iter()
            .skip(start)
            .enumerate()
            .take_while(|(offset, line)| {
                *offset == 0 || line.is_empty() || line.starts_with(char::is_whitespace)
            })
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n");

        self.version.find(&block).map(|found| found.as_str().to_string())
    }

    /// Parses one session. `log` is the whole log, add-on versions are looked up there.
    ///
    /// # Errors
    /// Returns an error only if an add-on version pattern cannot be built.
    pub fn parse_segment(
        &self,
        index: usize,
        segment: &str,
        log: &str,
    ) -> Result<SegmentOutcome, LogInfoError> {
        let skipped = |reason: &str| {
            tracing::debug!(index, reason, "Skipping log segment");
            Ok(SegmentOutcome::Skipped { index, reason: reason.to_string() })
        };

        let Some(cp_version) = self.cp_version.captures(segment).and_then(|c| c.get(1)) else {
            return skipped("no Courseplay version line");
        };
        let Some(savegame) = self.savegame.captures(segment) else {
            return skipped("no map loaded line");
        };
        let (Some(map_name), Some(savegame_name)) = (savegame.get(1), savegame.get(2)) else {
            return skipped("no map loaded line");
        };
        let savegame_name = savegame_name.as_str().trim();
        let Some(savegame_slot) = self
            .savegame_slot
            .captures(savegame_name)
            .and_then(|c| c.get(1))
            .and_then(|slot| slot.as_str().parse().ok())
        else {
            return skipped("no savegame slot");
        };

        let mut mods = Vec::new();
        for name in self.load_mod.captures_iter(segment).filter_map(|c| c.get(1)) {
            let name = name.as_str();
            mods.push(ModInfo { name: name.to_string(), version: mod_version(name, log)? });
        }

        Ok(SegmentOutcome::Parsed(GameSession {
            cp_version: cp_version.as_str().to_string(),
            map_name: map_name.as_str().trim().to_string(),
            savegame_name: savegame_name.to_string(),
            savegame_slot,
            mods,
        }))
    }
}

/// Version from the `(Version: 1.2.0.0) <name>` line of an add-on.
fn mod_version(name: &str, log: &str) -> Result<Option<String>, LogInfoError> {
    let pattern = Regex::new(&format!(r"Version:\s([\d.]+)\)\s*{}\b", regex::escape(name)))?;
    Ok(pattern.captures(log).and_then(|c| c.get(1)).map(|v| v.as_str().to_string()))
}

/// Reads a log file and extracts its report. Invalid UTF-8 is replaced.
///
/// # Errors
/// Returns an I/O error if the file cannot be read.
pub fn extract_log_info(path: &Path) -> Result<LogReport, LogInfoError> {
    let bytes =
        fs::read(path).map_err(|source| LogInfoError::Io { path: path.to_path_buf(), source })?;
    let log = String::from_utf8_lossy(&bytes);
    let report = LogExtractor::new()?.extract(&log)?;

    let parsed = report.segments.iter().filter(|segment| segment.session().is_some()).count();
    tracing::info!(
        path = %path.display(),
        sessions = report.segments.len(),
        parsed,
        "Extracted log info"
    );
    Ok(report)
}

/// Writes the report as pretty JSON to `output`, or to stdout.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn write_report(report: &LogReport, output: Option<&Path>) -> Result<(), LogInfoError> {
    let io_error = |path: &Path, source| LogInfoError::Io { path: path.to_path_buf(), source };
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| io_error(path, e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, report)?;
            writer.write_all(b"\n").and_then(|()| writer.flush()).map_err(|e| io_error(path, e))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, report)?;
            stdout.write_all(b"\n").map_err(|e| io_error(Path::new("<stdout>"), e))
        }
    }
}
