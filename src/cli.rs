use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::index::DuplicatePolicy;

#[derive(Parser, Debug)]
#[command(name = "starfield-to-sqlite")]
#[command(version, about = "Normalize crowd-sourced Starfield survey data into an SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize the raw data file into galaxy.json
    Restructure {
        /// Directory containing the data files
        data_dir: PathBuf,
    },

    /// Load resources.json and galaxy.json into a fresh sf.db
    CreateDb {
        /// Directory containing the data files
        data_dir: PathBuf,

        /// SQL schema file to execute verbatim instead of the built-in schema
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Policy for case-insensitive resource name collisions
        #[arg(long, value_enum, default_value = "reject")]
        on_duplicate: DuplicatePolicy,
    },

    /// Normalize and load in one run
    Sync {
        /// Directory containing the data files
        data_dir: PathBuf,

        /// SQL schema file to execute verbatim instead of the built-in schema
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Policy for case-insensitive resource name collisions
        #[arg(long, value_enum, default_value = "reject")]
        on_duplicate: DuplicatePolicy,
    },

    /// List all database table names
    ListTables,

    /// Look up a resource by short or full name
    Resolve {
        /// Directory containing resources.json
        data_dir: PathBuf,

        /// Short or full resource name, any casing
        name: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
