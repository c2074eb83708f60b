//! todowatch - todo.txt to WatchMe timer sync
//!
//! Reads the tasks due on a given day from a todo.txt file and adds one timer
//! per task to a WatchMe configuration file, cloning every new timer from a
//! template entry.
//!
//! # Pipeline
//!
//! ```text
//! todo.txt          ──► todo::read_due_tasks ───┐
//! template.xml      ──► watchme::load_template ─┼─► merge::merge_tasks ─► merge::sort_timers
//! WatchMeConfig.xml ──► watchme::load_config ───┘                                │
//!                                                                                ▼
//! WatchMeConfig.xml.bak ◄── (rename) ── watchme::save_with_backup ──► WatchMeConfig.xml
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todowatch::{Config, sync};
//!
//! let outcome = sync::run(Config::default())?;
//! std::process::exit(outcome.status().code());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod guid;
pub mod merge;
pub mod sync;
pub mod todo;
pub mod watchme;
mod xml;

pub use config::Config;
pub use error::{Error, InputKind, ParseError, Result};
pub use merge::MergeReport;
pub use sync::{ExitStatus, SyncOutcome};
pub use watchme::{Category, ConfigurationData, Setting, Timer, TimerAlert};

/// Default todo.txt source file
pub const DEFAULT_TODO_PATH: &str = "todo.txt";

/// Default WatchMe configuration file
pub const DEFAULT_WATCHME_PATH: &str = "WatchMeConfig.xml";

/// Default template for new timers
pub const DEFAULT_TEMPLATE_PATH: &str = "template.xml";

/// Suffix appended to the WatchMe config path for the previous version
pub const BACKUP_SUFFIX: &str = ".bak";
