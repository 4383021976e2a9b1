//! Roster loading
//!
//! Reads player rows from a spreadsheet export (CSV or TSV) or a JSON
//! array of players.
//!
//! Tabular input follows the sheet layout:
//!
//! | column | field    | values                                  |
//! |--------|----------|-----------------------------------------|
//! | 0      | name     | any text                                |
//! | 1      | power    | non-negative integer                    |
//! | 2      | priority | 0 = Required, 1 = Preferred, 2 = Flexible |
//! | 3      | position | 0 = Frontline, 1 = Backline             |
//!
//! The first row is always treated as a header. Rows that are too short or
//! carry values outside the table above are skipped and counted in
//! [`LoadStats`], never reported as errors. Numeric fields are trimmed;
//! names are kept exactly as written. Names that are not valid UTF-8
//! (a Shift-JIS export, say) are decoded lossily rather than dropped.
//!
//! JSON input is skipped per entry the same way: an array element that
//! does not describe a valid player is counted and logged. Only input
//! that is not a JSON array at all fails the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::error::RosterError;
use crate::player::{Player, Position, Priority};

/// Columns a row must have to be considered
const REQUIRED_COLUMNS: usize = 4;

/// Input encoding of a roster source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterFormat {
    /// Delimited text with a header row
    Csv { delimiter: u8 },
    /// JSON array of player objects
    Json,
}

impl RosterFormat {
    pub const CSV: RosterFormat = RosterFormat::Csv { delimiter: b',' };
    pub const TSV: RosterFormat = RosterFormat::Csv { delimiter: b'\t' };

    /// Guess the format from a file extension (`.json`, `.tsv`, else CSV)
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => RosterFormat::Json,
            Some("tsv") => RosterFormat::TSV,
            _ => RosterFormat::CSV,
        }
    }
}

impl Default for RosterFormat {
    fn default() -> Self {
        RosterFormat::CSV
    }
}

/// Counters collected while reading a roster
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data rows seen, header excluded
    pub rows: usize,
    pub loaded: usize,
    pub too_few_columns: usize,
    /// Non-integer numeric fields, or JSON entries that are not players
    pub unparsable: usize,
    pub out_of_range: usize,
    /// Players whose name was already taken by an earlier row
    pub duplicate_names: usize,
}

impl LoadStats {
    pub fn skipped(&self) -> usize {
        self.too_few_columns + self.unparsable + self.out_of_range
    }

    fn note_skip(&mut self, err: &RowError) {
        match err {
            RowError::TooFewColumns(_) => self.too_few_columns += 1,
            RowError::Unparsable { .. } | RowError::Malformed(_) => self.unparsable += 1,
            RowError::OutOfRange { .. } => self.out_of_range += 1,
        }
    }
}

/// Players read from a source, with load statistics
#[derive(Clone, Debug, Default)]
pub struct Roster {
    pub players: Vec<Player>,
    pub stats: LoadStats,
}

impl Roster {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of players in a tier and position
    pub fn count(&self, priority: Priority, position: Position) -> usize {
        self.players
            .iter()
            .filter(|p| p.priority == priority && p.position == position)
            .count()
    }

    /// Sum of all player power
    pub fn total_power(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.power)).sum()
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum RowError {
    #[error("expected at least 4 columns, found {0}")]
    TooFewColumns(usize),

    #[error("{field} is not an integer: '{value}'")]
    Unparsable { field: &'static str, value: String },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("not a player entry: {0}")]
    Malformed(String),
}

// ============================================================================
// PUBLIC ENTRY POINTS
// ============================================================================

/// Load a roster file
pub fn load_roster(path: &Path, format: RosterFormat) -> Result<Roster, RosterError> {
    let file = File::open(path)?;
    read_roster(file, format)
}

/// Read a roster from any byte source
pub fn read_roster<R: Read>(reader: R, format: RosterFormat) -> Result<Roster, RosterError> {
    let mut roster = match format {
        RosterFormat::Csv { delimiter } => read_delimited(reader, delimiter)?,
        RosterFormat::Json => read_json(reader)?,
    };

    roster.stats.duplicate_names = count_duplicate_names(&roster.players);

    tracing::debug!(
        "Read {} players from {} rows ({} skipped)",
        roster.stats.loaded,
        roster.stats.rows,
        roster.stats.skipped()
    );

    Ok(roster)
}

// ============================================================================
// FORMAT READERS
// ============================================================================

fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut roster = Roster::default();

    // Byte records: a badly encoded cell must not abort the whole load
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = record.position().map_or(index as u64 + 2, |pos| pos.line());
        roster.stats.rows += 1;

        match parse_row(&record) {
            Ok(player) => {
                if std::str::from_utf8(&record[0]).is_err() {
                    tracing::warn!("Line {}: name is not valid UTF-8, read as {:?}", line, player.name);
                }
                roster.players.push(player);
            }
            Err(err) => {
                tracing::warn!("Skipping line {}: {}", line, err);
                roster.stats.note_skip(&err);
            }
        }
    }

    roster.stats.loaded = roster.players.len();
    Ok(roster)
}

fn read_json<R: Read>(reader: R) -> Result<Roster, RosterError> {
    let entries: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    let mut roster = Roster::default();

    for (index, entry) in entries.into_iter().enumerate() {
        roster.stats.rows += 1;

        match serde_json::from_value::<Player>(entry) {
            Ok(player) => roster.players.push(player),
            Err(err) => {
                let err = RowError::Malformed(err.to_string());
                tracing::warn!("Skipping entry {}: {}", index, err);
                roster.stats.note_skip(&err);
            }
        }
    }

    roster.stats.loaded = roster.players.len();
    Ok(roster)
}

// ============================================================================
// ROW PARSING
// ============================================================================

fn parse_row(record: &csv::ByteRecord) -> Result<Player, RowError> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(RowError::TooFewColumns(record.len()));
    }

    let power = parse_int(&record[1], "power")?;
    let priority = parse_int(&record[2], "priority")?;
    let position = parse_int(&record[3], "position")?;

    let power = u32::try_from(power).map_err(|_| RowError::OutOfRange {
        field: "power",
        value: power,
    })?;
    let priority = Priority::try_from(priority).map_err(|e| RowError::OutOfRange {
        field: e.kind,
        value: e.code,
    })?;
    let position = Position::try_from(position).map_err(|e| RowError::OutOfRange {
        field: e.kind,
        value: e.code,
    })?;

    let name = String::from_utf8_lossy(&record[0]);

    Ok(Player::new(name, power, priority, position))
}

/// Parse a numeric cell, ignoring surrounding whitespace
fn parse_int(value: &[u8], field: &'static str) -> Result<i64, RowError> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|text| text.trim().parse::<i64>().ok())
        .ok_or_else(|| RowError::Unparsable {
            field,
            value: String::from_utf8_lossy(value).into_owned(),
        })
}

/// Count players whose name repeats an earlier one, warning for each
fn count_duplicate_names(players: &[Player]) -> usize {
    let mut seen = FxHashSet::default();
    let mut duplicates = 0;

    for player in players {
        if !seen.insert(player.name.as_str()) {
            tracing::warn!("Duplicate player name: {}", player.name);
            duplicates += 1;
        }
    }

    duplicates
}
