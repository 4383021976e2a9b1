//! Assign command - split a roster into balanced teams
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), assign_roster(), report_results()
//! - Level 3: (delegated to teamsplit-core engine)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use teamsplit_core::{assign, AssignConfig, Assignment, Report, Roster, TextReport};

use crate::input::RosterArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct AssignArgs {
    #[command(flatten)]
    pub input: RosterArgs,

    /// Number of teams [default: 4]
    #[arg(long)]
    pub teams: Option<usize>,

    /// Maximum team score for preferred and flexible placements [default: 10600]
    #[arg(long)]
    pub cap: Option<u64>,

    /// JSON config file with `team_count` and `power_cap`; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run assign command
///
/// This function reads like a table of contents:
/// 1. Resolve configuration
/// 2. Load the roster
/// 3. Assign teams
/// 4. Report results
pub fn run(args: AssignArgs) -> Result<()> {
    let config = build_config(&args)?;
    let roster = args.input.load()?;

    let assignment = assign_roster(&roster, &config)?;

    report_results(&assignment, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file (if any) with command-line overrides
fn build_config(args: &AssignArgs) -> Result<AssignConfig> {
    let mut config = match &args.config {
        Some(path) => AssignConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AssignConfig::default(),
    };

    if let Some(teams) = args.teams {
        config = config.with_team_count(teams);
    }
    if let Some(cap) = args.cap {
        config = config.with_power_cap(cap);
    }

    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Run the engine and log anyone left without a team
fn assign_roster(roster: &Roster, config: &AssignConfig) -> Result<Assignment> {
    tracing::info!(
        "Assigning {} players to {} teams (cap {})",
        roster.len(),
        config.team_count,
        config.power_cap
    );

    let assignment = assign(&roster.players, config).context("Team assignment failed")?;

    if !assignment.unassigned.is_empty() {
        tracing::warn!(
            "{} players did not fit under the power cap of {}",
            assignment.unassigned.len(),
            assignment.power_cap
        );
    }

    Ok(assignment)
}

/// Print the report to stdout
fn report_results(assignment: &Assignment, json: bool) -> Result<()> {
    if json {
        let report = Report::from_assignment(assignment);
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        print!("{}", TextReport::new(assignment));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
