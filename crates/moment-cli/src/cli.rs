//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// See your life clearly.
///
/// Shows how far through the year and through a lifetime you are, and
/// counts down to the events that matter to you.
#[derive(Debug, Parser)]
#[command(name = "moment", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show year progress, life progress and event countdowns.
    Status,

    /// Show progress through a calendar year.
    Year {
        /// Year to show (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show life progress in weeks and months.
    Life {
        /// Life expectancy in years (defaults to the configured value).
        #[arg(long)]
        expectancy: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set your birthdate.
    ///
    /// Accepts YYYY-MM-DD, RFC 3339, or relative forms like "30 weeks ago".
    Birthdate {
        /// The birthdate.
        date: String,
    },

    /// Manage events.
    #[command(subcommand)]
    Events(EventsAction),

    /// Choose a color theme.
    Theme {
        /// Theme name (e.g., midnight, slate, sunset).
        name: String,
    },

    /// Record whether premium has been purchased on this device.
    Premium {
        /// Turn premium on or off.
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Delete all stored data.
    Reset,
}

/// Event subcommands.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events with countdowns and progress.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add an event.
    Add {
        /// Event title.
        #[arg(long)]
        title: String,

        /// Event date (YYYY-MM-DD, RFC 3339, or e.g. "in 10 days").
        #[arg(long)]
        date: String,

        /// Icon name.
        #[arg(long)]
        icon: Option<String>,

        /// Color as a hex string (e.g., #6366f1).
        #[arg(long)]
        color: Option<String>,
    },
    /// Update an event.
    Update {
        /// Event ID.
        id: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New date.
        #[arg(long)]
        date: Option<String>,

        /// New icon name.
        #[arg(long)]
        icon: Option<String>,

        /// New color.
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an event.
    Delete {
        /// Event ID.
        id: String,
    },
}

/// On/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}
