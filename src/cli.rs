use clap::{Parser, Subcommand};
use report::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "regress-report")]
#[command(
    author,
    version,
    about = "Render the HTML dashboard of a regression test run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard of a test run into an output directory
    Render {
        /// JSON file mapping test names to their reports
        #[clap(short, long)]
        reports: PathBuf,

        /// JSON snapshot of the results database
        #[clap(short, long)]
        database: PathBuf,

        /// Directory receiving the page and its assets
        #[clap(short, long)]
        output: PathBuf,

        /// Base name of the page, without extension
        #[clap(short, long, default_value = "report")]
        name: String,

        /// Report configuration file (defaults apply when omitted)
        #[clap(short, long)]
        config: Option<PathBuf>,

        /// Also keep a dated copy that later reports link to
        #[clap(long, default_value_t = false)]
        archive: bool,

        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },

    /// Write a default report configuration file
    Init {
        /// Configuration file to create
        #[clap(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Overwrite an existing file
        #[clap(long, default_value_t = false)]
        force: bool,
    },
}

impl Commands {
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Render { verbose, .. } => *verbose,
            Commands::Init { .. } => false,
        }
    }
}
