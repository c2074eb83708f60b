//! Configuration for todowatch

use chrono::NaiveDate;
use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Settings for one sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Source todo.txt file
    #[serde(default = "default_todo_path")]
    pub todo_path: PathBuf,

    /// WatchMe configuration file to update
    #[serde(default = "default_watchme_path")]
    pub watchme_path: PathBuf,

    /// Template for new timers
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date to select tasks for; today when unset
    #[serde(skip)]
    pub date: Option<NaiveDate>,

    /// Skip writing the WatchMe config
    #[serde(skip)]
    pub dry_run: bool,
}

fn default_todo_path() -> PathBuf {
    PathBuf::from(crate::DEFAULT_TODO_PATH)
}

fn default_watchme_path() -> PathBuf {
    PathBuf::from(crate::DEFAULT_WATCHME_PATH)
}

fn default_template_path() -> PathBuf {
    PathBuf::from(crate::DEFAULT_TEMPLATE_PATH)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_path: default_todo_path(),
            watchme_path: default_watchme_path(),
            template_path: default_template_path(),
            log_level: default_log_level(),
            date: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("todowatch").join("config.yml")),
            Some(PathBuf::from("todowatch.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override loaded values with whatever was given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(todo) = &cli.todo {
            self.todo_path = todo.clone();
        }
        if let Some(watchme) = &cli.watchme {
            self.watchme_path = watchme.clone();
        }
        if let Some(template) = &cli.template {
            self.template_path = template.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if cli.date.is_some() {
            self.date = cli.date;
        }
        self.dry_run |= cli.dry_run;
    }
}
