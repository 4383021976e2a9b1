//! Report rendering
//!
//! Text output looks like:
//!
//! ```text
//!
//! Team 1 (Score: 5200, Avg: 2600.00)
//!   Ika - 3000pt (Required, Frontline)
//!   Tako - 2200pt (Preferred, Backline)
//! ```
//!
//! followed by an `Unassigned` block when some players could not be seated.

use std::fmt;

use serde::Serialize;

use crate::engine::{Assignment, Team};
use crate::player::Player;

/// Plain-text rendering of an assignment
pub struct TextReport<'a> {
    assignment: &'a Assignment,
}

impl<'a> TextReport<'a> {
    pub fn new(assignment: &'a Assignment) -> Self {
        Self { assignment }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, team) in self.assignment.teams.iter().enumerate() {
            writeln!(f)?;
            writeln!(
                f,
                "Team {} (Score: {}, Avg: {:.2})",
                i + 1,
                team.score(),
                team.average()
            )?;
            for player in team.members() {
                writeln!(f, "  {}", player)?;
            }
        }

        let unassigned = &self.assignment.unassigned;
        if !unassigned.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unassigned ({})", unassigned.len())?;
            for player in unassigned {
                writeln!(f, "  {}", player)?;
            }
        }

        Ok(())
    }
}

/// Machine-readable report
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub power_cap: u64,
    pub teams: Vec<TeamReport>,
    pub unassigned: Vec<MemberReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TeamReport {
    /// 1-based, matching the text report
    pub index: usize,
    pub score: u64,
    pub average: f64,
    pub members: Vec<MemberReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberReport {
    pub name: String,
    pub power: u32,
    pub priority: &'static str,
    pub position: &'static str,
}

impl From<&Player> for MemberReport {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            power: player.power,
            priority: player.priority.label(),
            position: player.position.label(),
        }
    }
}

impl TeamReport {
    fn new(index: usize, team: &Team) -> Self {
        Self {
            index: index + 1,
            score: team.score(),
            average: team.average(),
            members: team.members().iter().map(MemberReport::from).collect(),
        }
    }
}

impl Report {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        Self {
            power_cap: assignment.power_cap,
            teams: assignment
                .teams
                .iter()
                .enumerate()
                .map(|(i, team)| TeamReport::new(i, team))
                .collect(),
            unassigned: assignment.unassigned.iter().map(MemberReport::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
