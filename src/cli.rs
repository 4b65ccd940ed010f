use crate::config::SettingsOverrides;
use crate::types::{AgeRange, Gender, Palette, Style};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// colorwise - a style questionnaire that pairs you with an outfit
#[derive(Parser)]
#[command(name = "colorwise")]
#[command(about = "Answer four questions, get an outfit recommendation")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON). Defaults apply when omitted.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the pairing service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Log file for the interactive UI
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Offline mode: answer pairing requests locally without a network.
    ///
    /// The recommendation is a fixed placeholder derived from the answers,
    /// useful for trying the questionnaire without a running service.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive questionnaire (default)
    Run,
    /// Submit answers without the UI and print the recommendation
    Pair {
        /// Age range (13-17, 18-24, 25-34, 35-44, 45+)
        #[arg(long)]
        age: AgeRange,
        /// Female, Male or Other
        #[arg(long)]
        gender: Gender,
        /// Casual, Formal, Sporty or Chic
        #[arg(long)]
        style: Style,
        /// Neutral, Cool or Warm
        #[arg(long)]
        palette: Palette,
    },
    /// Validate a settings file
    Validate {
        /// Path to settings file to validate
        file: PathBuf,
    },
    /// List the options offered at each step
    Options,
}

impl Cli {
    /// Flags that override values from the settings file
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            service_url: self.service_url.clone(),
            timeout_secs: self.timeout,
            log_file: self.log_file.clone(),
        }
    }

    /// Whether this invocation starts the terminal UI
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }
}
