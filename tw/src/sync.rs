//! One sync run: read due tasks, merge them, write the WatchMe config

use chrono::{Local, NaiveDate};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::error::{Error, InputKind, Result};
use crate::merge::{self, MergeReport};
use crate::{todo, watchme};

/// Process exit status of the `tw` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Config written (or dry run completed)
    Synced,
    /// No task due on the run date; nothing was touched
    NothingDue,
    /// A required input file does not exist
    MissingFile,
    /// Any other failure
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Synced => 0,
            ExitStatus::NothingDue => 1,
            ExitStatus::MissingFile => 2,
            ExitStatus::Failure => 3,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

impl From<&Error> for ExitStatus {
    fn from(err: &Error) -> Self {
        if err.is_missing_file() {
            ExitStatus::MissingFile
        } else {
            ExitStatus::Failure
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No line in the todo file is due on `date`
    NothingDue { date: NaiveDate },
    /// Timers were merged; `backup` is `None` for a dry run
    Merged {
        date: NaiveDate,
        report: MergeReport,
        backup: Option<PathBuf>,
    },
}

impl SyncOutcome {
    pub fn status(&self) -> ExitStatus {
        match self {
            SyncOutcome::NothingDue { .. } => ExitStatus::NothingDue,
            SyncOutcome::Merged { .. } => ExitStatus::Synced,
        }
    }
}

/// Check that all three input files exist, in the order todo, WatchMe, template
pub fn preflight(config: &Config) -> Result<()> {
    let inputs: [(InputKind, &Path); 3] = [
        (InputKind::Todo, config.todo_path.as_path()),
        (InputKind::WatchMe, config.watchme_path.as_path()),
        (InputKind::Template, config.template_path.as_path()),
    ];

    for (kind, path) in inputs {
        if !path.exists() {
            return Err(Error::MissingFile {
                kind,
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Run the whole pipeline for `config`.
///
/// When no task is due the WatchMe config is left untouched. Otherwise all
/// timers are sorted by name and the config is rewritten, with the previous
/// version kept next to it as `.bak`, even if every due task already had a
/// timer.
pub fn run(config: Config) -> Result<SyncOutcome> {
    preflight(&config)?;

    let date = config.date.unwrap_or_else(|| Local::now().date_naive());
    let tasks = todo::read_due_tasks(&config.todo_path, date)?;
    if tasks.is_empty() {
        info!("No tasks due {}", date);
        return Ok(SyncOutcome::NothingDue { date });
    }

    let template = watchme::load_template(&config.template_path)?;
    let mut data = watchme::load_config(&config.watchme_path)?;

    let report = merge::merge_tasks(&mut data, &template, &tasks);
    merge::sort_timers(&mut data);
    info!(
        "Merged {} new timer(s), {} already present",
        report.added.len(),
        report.skipped.len()
    );

    if config.dry_run {
        info!("Dry run: {} left unchanged", config.watchme_path.display());
        return Ok(SyncOutcome::Merged {
            date,
            report,
            backup: None,
        });
    }

    let backup = watchme::save_with_backup(&data, &config.watchme_path)?;
    Ok(SyncOutcome::Merged {
        date,
        report,
        backup: Some(backup),
    })
}
