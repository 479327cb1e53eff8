use std::path::PathBuf;

use clap::Parser;

use crate::acquire::Consent;

/// Month calendar with Japanese public holidays.
#[derive(Parser, Debug)]
#[command(
    name = "holical",
    version,
    about = "Month calendar with Japanese public holidays"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the holiday cache file.
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Override the dataset download URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Year to show; asked interactively when omitted.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month to show (1-12); asked interactively when omitted.
    #[arg(short, long, allow_negative_numbers = true)]
    pub month: Option<i64>,

    /// Download the dataset without asking when there is no cache.
    #[arg(long, conflicts_with = "offline")]
    pub yes: bool,

    /// Never download the dataset.
    #[arg(long)]
    pub offline: bool,
}

impl Cli {
    pub fn consent(&self) -> Consent {
        if self.yes {
            Consent::Always
        } else if self.offline {
            Consent::Never
        } else {
            Consent::Ask
        }
    }
}
