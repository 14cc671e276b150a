//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mjour")]
#[command(about = "Personal journal with moods, tags, streaks and statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// PIN for a locked journal
    #[arg(long, global = true, value_name = "PIN")]
    pub pin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Write or update the entry for a day
    Write {
        /// Day of the entry (e.g., today, yesterday, last monday, 2025-01-17)
        #[arg(value_name = "DATE")]
        date: Vec<String>,

        #[arg(short, long)]
        title: Option<String>,

        /// Primary mood
        #[arg(short, long)]
        mood: Option<String>,

        /// Secondary moods (at most two)
        #[arg(long = "also", value_name = "MOOD")]
        also: Vec<String>,

        /// Tag names; replaces the entry's current tags
        #[arg(long = "tag", value_name = "NAME")]
        tags: Vec<String>,

        /// Mark as favorite
        #[arg(short, long)]
        favorite: bool,

        /// Entry text; opens the editor when omitted
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Show a single entry
    Show {
        /// A day or an entry id such as #12
        #[arg(required = true, value_name = "DATE|#ID")]
        target: Vec<String>,
    },

    /// List entries, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Entries per page (default from config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Only entries whose title or content contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search titles and content
    Search {
        term: String,
    },

    /// Filter entries by mood, tag and date range
    Filter {
        #[arg(short, long)]
        mood: Option<String>,

        /// Tag name
        #[arg(short, long)]
        tag: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// A day or an entry id such as #12
        #[arg(required = true, value_name = "DATE|#ID")]
        target: Vec<String>,
    },

    /// Show which days of a month have entries
    Calendar {
        year: i32,
        month: u32,
    },

    /// Show the writing streak
    Streak,

    /// List recent days without an entry
    Missed {
        /// How many days back to look (default from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Journal statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },

    /// Manage tags
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },

    /// Manage the PIN lock
    Pin {
        #[command(subcommand)]
        command: PinCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Mood distribution
    Moods {
        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Most used tags
    Tags {
        /// How many tags to show (default from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Words written per day
    Trend {
        /// How many days back to look (default from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Entries and words per month
    Monthly {
        /// How many months back to look (default from config)
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Totals for the whole journal
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum TagsCommand {
    /// List tags
    List {
        /// Only custom tags
        #[arg(long, conflicts_with = "prebuilt")]
        custom: bool,

        /// Only pre-built tags
        #[arg(long)]
        prebuilt: bool,
    },

    /// Create a custom tag
    Add {
        name: String,

        /// Colour as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename or recolour a custom tag
    Edit {
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a custom tag
    Remove {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PinCommand {
    /// Set or replace the PIN
    Set {
        new_pin: String,
    },

    /// Check a PIN without doing anything else
    Check {
        candidate: String,
    },

    /// Remove the PIN lock
    Remove,

    /// Show whether a PIN is set
    Status,
}
