//! CLI argument parsing for todowatch

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Add timers to WatchMe for every todo.txt task due today
#[derive(Parser, Debug)]
#[command(name = "tw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the todowatch config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source todo.txt file [default: todo.txt]
    #[arg(short, long, visible_alias = "td", value_name = "PATH")]
    pub todo: Option<PathBuf>,

    /// WatchMe configuration file [default: WatchMeConfig.xml]
    #[arg(short, long, value_name = "PATH")]
    pub watchme: Option<PathBuf>,

    /// Todo item template file [default: template.xml]
    #[arg(short = 'T', long, visible_alias = "tt", value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Merge and report without writing the WatchMe config
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}
