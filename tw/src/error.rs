//! Error types for the sync pipeline

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which of the three input files an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Todo,
    WatchMe,
    Template,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InputKind::Todo => "Source todo.txt file",
            InputKind::WatchMe => "WatchMe config file",
            InputKind::Template => "Template file for a todo item",
        };
        f.write_str(label)
    }
}

/// Why a WatchMe document could not be read
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Field(#[from] serde::de::value::Error),

    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("document ends inside <{0}>")]
    UnexpectedEof(String),

    #[error("text outside the root element")]
    TextOutsideRoot,

    #[error("no root element")]
    MissingRoot,
}

/// Errors that can occur while syncing tasks into the WatchMe config
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} not found: {}", path.display())]
    MissingFile { kind: InputKind, path: PathBuf },

    #[error("I/O error on {}: {}", path.display(), source)]
    Io { path: PathBuf, source: io::Error },

    #[error("Malformed XML in {}: {}", path.display(), source)]
    Parse { path: PathBuf, source: ParseError },

    #[error("Failed to serialize WatchMe configuration: {0}")]
    Serialize(#[from] quick_xml::se::SeError),
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, source: ParseError) -> Self {
        Error::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Check if this error was raised by the pre-flight file check
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::MissingFile { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
