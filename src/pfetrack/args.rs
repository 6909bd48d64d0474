use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pfetrack",
    about = "Persistence core for a PFE tracking portal",
    version
)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the store, seeding absent collections
    Init {
        /// Seed every collection empty instead of the demo dataset
        #[arg(long)]
        empty: bool,
    },
    /// List a collection
    List {
        #[arg(value_enum)]
        target: ListTarget,
    },
    /// Export the store as a backup envelope
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Restore collections from a backup envelope
    Import { file: PathBuf },
    /// Empty the notification history
    ClearNotifications,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListTarget {
    Projects,
    Appointments,
    Notifications,
}
