use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::debug;
use std::process::ExitCode;

use todowatch::cli::Cli;
use todowatch::config::Config;
use todowatch::sync::{self, ExitStatus, SyncOutcome};

fn setup_logging(level: &str) -> Result<()> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| eyre::eyre!("Invalid log level: {}", level))?;
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_cli(cli);
    setup_logging(&config.log_level).context("Failed to setup logging")?;
    debug!("Resolved config: {:?}", config);
    Ok(config)
}

fn print_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::NothingDue { date } => {
            println!("No tasks due {}", date.to_string().cyan());
        }
        SyncOutcome::Merged { report, backup, .. } => {
            for name in &report.added {
                println!("{} {}", "+".green(), name);
            }
            for name in &report.skipped {
                println!("{} {} {}", "=".dimmed(), name, "(already present)".dimmed());
            }
            match backup {
                Some(path) => println!("Previous config saved to {}", path.display().to_string().cyan()),
                None => println!("{}", "Dry run: WatchMe config not written".yellow()),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {:#}", "✗".red(), err);
            return ExitStatus::Failure.into();
        }
    };

    match sync::run(config) {
        Ok(outcome) => {
            print_outcome(&outcome);
            outcome.status().into()
        }
        Err(err) => {
            eprintln!("{} {}", "✗".red(), err);
            ExitStatus::from(&err).into()
        }
    }
}
