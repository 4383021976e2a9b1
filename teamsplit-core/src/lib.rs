//! teamsplit core - roster loading, team assignment and reporting
//!
//! This crate provides the logic behind the `teamsplit` tool:
//! - Player records with priority tiers and positions
//! - The four-phase greedy team assignment engine
//! - Roster loading from spreadsheet exports (CSV/TSV) and JSON
//! - Text and JSON rendering of the resulting teams

pub mod config;
pub mod engine;
pub mod error;
pub mod player;
pub mod report;
pub mod roster;

// Re-exports for convenient access
pub use config::{AssignConfig, DEFAULT_POWER_CAP, DEFAULT_TEAM_COUNT};
pub use engine::{assign, assign_teams, Assignment, Team};
pub use error::{AssignError, ConfigError, InvalidCode, RosterError};
pub use player::{Player, Position, Priority};
pub use report::{Report, TextReport};
pub use roster::{load_roster, read_roster, LoadStats, Roster, RosterFormat};
