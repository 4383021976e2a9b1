//! Roster input arguments shared by all commands

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use teamsplit_core::{load_roster, read_roster, Roster, RosterFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
    Json,
}

#[derive(Args)]
pub struct RosterArgs {
    /// Roster file: spreadsheet export (CSV/TSV) or JSON. Use `-` for stdin
    #[arg(value_name = "ROSTER")]
    pub roster: PathBuf,

    /// Input format (default: guessed from the file extension, CSV for stdin)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Field delimiter for CSV input
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl RosterArgs {
    /// Load the roster, logging how many rows made it through
    pub fn load(&self) -> Result<Roster> {
        let format = self.resolve_format()?;

        let roster = if self.reads_stdin() {
            read_roster(std::io::stdin().lock(), format).context("Failed to read roster from stdin")?
        } else {
            load_roster(&self.roster, format)
                .with_context(|| format!("Failed to load roster: {}", self.roster.display()))?
        };

        tracing::info!(
            "Loaded {} players ({} rows skipped)",
            roster.len(),
            roster.stats.skipped()
        );

        Ok(roster)
    }

    fn reads_stdin(&self) -> bool {
        self.roster.as_os_str() == "-"
    }

    fn resolve_format(&self) -> Result<RosterFormat> {
        let format = match self.format {
            Some(FormatArg::Csv) => RosterFormat::CSV,
            Some(FormatArg::Tsv) => RosterFormat::TSV,
            Some(FormatArg::Json) => RosterFormat::Json,
            None if self.reads_stdin() => RosterFormat::CSV,
            None => RosterFormat::from_path(&self.roster),
        };

        match (format, self.delimiter) {
            (_, None) => Ok(format),
            (RosterFormat::Csv { .. }, Some(c)) => Ok(RosterFormat::Csv {
                delimiter: delimiter_byte(c)?,
            }),
            (RosterFormat::Json, Some(_)) => bail!("--delimiter only applies to CSV input"),
        }
    }
}

fn delimiter_byte(c: char) -> Result<u8> {
    if !c.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got {:?}", c);
    }
    Ok(c as u8)
}
