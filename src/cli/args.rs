use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "focusbar")]
#[command(about = "A Pomodoro-style focus timer for your terminal")]
#[command(long_about = "focusbar - a Pomodoro-style focus timer

Runs a one-line status bar with a focus countdown. Click (or press
space) to start, pause and resume. Double-click to abandon a session.
Each completed focus session is followed by a five minute break and
counted toward today's total.

QUICK START:
  focusbar                  Open the timer
  focusbar status           Show today's completed sessions
  focusbar set-length 50    Use 50 minute focus sessions

For more information on a specific command, run:
  focusbar <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding the session record and log file
    ///
    /// Defaults to ~/.focusbar
    #[arg(long, env = "FOCUSBAR_HOME", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys:
    ///   space / enter / click    Start, pause or resume
    ///   double press             Abandon the current session
    ///   s                        Set the focus length
    ///   q / esc                  Quit
    Run,

    /// Show the completed session count and settings
    ///
    /// Applies the daily reset first, so a count left over from a
    /// previous day shows as zero.
    Status,

    /// Set the focus session length in minutes
    ///
    /// Takes effect from the next session. The value must be a
    /// positive whole number.
    ///
    /// Examples:
    ///   focusbar set-length 25
    ///   focusbar set-length 50
    SetLength {
        /// Minutes per focus session
        #[arg(allow_hyphen_values = true)]
        minutes: String,
    },

    /// Reset the completed session count to zero
    Reset,

    /// Generate shell completions
    ///
    /// Examples:
    ///   focusbar completions bash > ~/.local/share/bash-completion/completions/focusbar
    ///   focusbar completions zsh > ~/.zsh/completions/_focusbar
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
