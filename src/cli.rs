use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mulemap")]
#[command(about = "MuleSoft migration complexity analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a folder of MuleSoft repositories
    Analyze {
        /// Path to the folder containing MuleSoft repositories
        path: PathBuf,

        /// Specific project names to analyze (default: all discovered projects)
        #[arg(long = "projects", value_delimiter = ',')]
        projects: Option<Vec<String>>,

        /// Output directory for the report files
        #[arg(long = "output-dir", default_value = "report_output")]
        output_dir: PathBuf,

        /// Generate an individual JSON file per project
        #[arg(long = "individual-files")]
        individual_files: bool,

        /// Maximum directory depth searched for project roots
        #[arg(long = "max-depth")]
        max_depth: Option<usize>,

        /// Configuration file (defaults to .mulemap.toml in the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
