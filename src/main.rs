use anyhow::Result;
use clap::Parser;
use mulemap::cli::{Cli, Commands};
use mulemap::commands::{analyze, init};
use mulemap::config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            projects,
            output_dir,
            individual_files,
            max_depth,
            config: config_path,
            verbosity,
        } => {
            init_logging(verbosity);
            let config = match config_path {
                Some(path) => config::load_config(&path),
                None => config::get_config().clone(),
            };
            analyze::handle_analyze(
                analyze::AnalyzeConfig {
                    path,
                    projects,
                    output_dir,
                    individual_files,
                    max_depth,
                },
                &config,
            )
        }
        Commands::Init { force } => {
            init_logging(0);
            init::init_config(force)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}
