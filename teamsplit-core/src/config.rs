//! Assignment configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssignError, ConfigError};

/// Number of teams built when nothing else is configured.
pub const DEFAULT_TEAM_COUNT: usize = 4;

/// Team score ceiling enforced for preferred and flexible placements.
pub const DEFAULT_POWER_CAP: u64 = 10_600;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignConfig {
    /// Number of teams to build
    pub team_count: usize,
    /// Maximum team score after a load-balanced placement
    pub power_cap: u64,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            team_count: DEFAULT_TEAM_COUNT,
            power_cap: DEFAULT_POWER_CAP,
        }
    }
}

impl AssignConfig {
    /// Create config for the given number of teams with the default cap
    pub fn new(team_count: usize) -> Self {
        Self {
            team_count,
            ..Default::default()
        }
    }

    /// Set the number of teams
    pub fn with_team_count(mut self, team_count: usize) -> Self {
        self.team_count = team_count;
        self
    }

    /// Set the power cap
    pub fn with_power_cap(mut self, power_cap: u64) -> Self {
        self.power_cap = power_cap;
        self
    }

    /// Check the engine preconditions that depend on configuration alone
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.team_count == 0 {
            return Err(AssignError::InvalidTeamCount(self.team_count));
        }
        Ok(())
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AssignConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
