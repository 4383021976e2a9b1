//! Check command - load a roster and summarize it without assigning
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: summarize(), report_summary()
//! - Level 3: (delegated to teamsplit-core roster loader)
//! - Level 4: formatting utilities

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;

use teamsplit_core::{LoadStats, Position, Priority, Roster};

use crate::input::RosterArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: RosterArgs,

    /// Output summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Players per tier and position
#[derive(Clone, Debug, PartialEq, Eq)]
struct TierCount {
    priority: Priority,
    frontline: usize,
    backline: usize,
}

/// What the loader made of a roster
#[derive(Clone, Debug)]
struct RosterSummary {
    stats: LoadStats,
    total_power: u64,
    tiers: Vec<TierCount>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run check command
///
/// 1. Load the roster
/// 2. Summarize it
/// 3. Report, failing if no usable players were found
pub fn run(args: CheckArgs) -> Result<()> {
    let roster = args.input.load()?;

    let summary = summarize(&roster);
    report_summary(&summary, args.json)?;

    if roster.is_empty() {
        bail!("Roster contains no usable players");
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn summarize(roster: &Roster) -> RosterSummary {
    let tiers = Priority::ALL
        .iter()
        .map(|&priority| TierCount {
            priority,
            frontline: roster.count(priority, Position::Frontline),
            backline: roster.count(priority, Position::Backline),
        })
        .collect();

    RosterSummary {
        stats: roster.stats.clone(),
        total_power: roster.total_power(),
        tiers,
    }
}

fn report_summary(summary: &RosterSummary, as_json: bool) -> Result<()> {
    if as_json {
        let tiers: Vec<serde_json::Value> = summary
            .tiers
            .iter()
            .map(|t| {
                json!({
                    "priority": t.priority.label(),
                    "frontline": t.frontline,
                    "backline": t.backline,
                })
            })
            .collect();
        let output = json!({
            "stats": summary.stats,
            "total_power": summary.total_power,
            "tiers": tiers,
        });
        let text = serde_json::to_string_pretty(&output).context("Failed to serialize summary")?;
        println!("{}", text);
    } else {
        print!("{}", format_summary(summary));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_summary(summary: &RosterSummary) -> String {
    let stats = &summary.stats;
    let mut lines = vec![
        "=== Roster Check ===".to_string(),
        format!("Rows read:        {}", stats.rows),
        format!("Players loaded:   {}", stats.loaded),
        format!(
            "Rows skipped:     {} (short: {}, not a number: {}, out of range: {})",
            stats.skipped(),
            stats.too_few_columns,
            stats.unparsable,
            stats.out_of_range
        ),
        format!("Duplicate names:  {}", stats.duplicate_names),
        format!("Total power:      {}", summary.total_power),
        String::new(),
        "Breakdown:".to_string(),
    ];

    for tier in &summary.tiers {
        lines.push(format!(
            "  {:<10} {}: {:>3}  {}: {:>3}",
            tier.priority.label(),
            Position::Frontline,
            tier.frontline,
            Position::Backline,
            tier.backline
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use teamsplit_core::{read_roster, RosterFormat};

    fn roster() -> Roster {
        let csv = "name,power,priority,position\n\
                   A,1000,0,0\n\
                   B,800,0,1\n\
                   C,1200,1,1\n\
                   D,900,2,0\n\
                   E,oops,2,0\n";
        read_roster(csv.as_bytes(), RosterFormat::CSV).unwrap()
    }

    #[test]
    fn test_summarize_counts_tiers() {
        let summary = summarize(&roster());

        assert_eq!(summary.total_power, 3900);
        assert_eq!(
            summary.tiers[0],
            TierCount {
                priority: Priority::Required,
                frontline: 1,
                backline: 1
            }
        );
        assert_eq!(summary.tiers[1].backline, 1);
        assert_eq!(summary.tiers[2].frontline, 1);
        assert_eq!(summary.stats.unparsable, 1);
    }

    #[test]
    fn test_format_summary() {
        let text = format_summary(&summarize(&roster()));

        assert!(text.starts_with("=== Roster Check ===\n"));
        assert!(text.contains("Players loaded:   4"));
        assert!(text.contains("Rows skipped:     1 (short: 0, not a number: 1, out of range: 0)"));
        assert!(text.contains("  Required   Frontline:   1  Backline:   1"));
    }
}
