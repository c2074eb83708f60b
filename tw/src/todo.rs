//! todo.txt reader
//!
//! A task is due on a date when its line carries the ` due:YYYY-MM-DD`
//! annotation for that date. The annotation must be preceded by a space, so a
//! line that starts with `due:` is not selected.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// The annotation marking a task as due on `date`
pub fn due_marker(date: NaiveDate) -> String {
    format!(" due:{}", date.format("%Y-%m-%d"))
}

/// Select the lines due on `date`, with every due marker removed.
///
/// Lines keep the order they have in the input. Bytes that are not valid
/// UTF-8 are replaced with U+FFFD rather than failing the whole file.
pub fn select_due<R: BufRead>(reader: R, date: NaiveDate) -> io::Result<Vec<String>> {
    let marker = due_marker(date);
    let mut tasks = Vec::new();

    for (number, bytes) in reader.split(b'\n').enumerate() {
        let mut bytes = bytes?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!("Line {} is not valid UTF-8, invalid bytes replaced", number + 1);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        if line.contains(&marker) {
            debug!("Selected: {}", line);
            tasks.push(line.replace(&marker, ""));
        }
    }

    Ok(tasks)
}

/// Read the tasks due on `date` from the todo.txt file at `path`
pub fn read_due_tasks(path: &Path, date: NaiveDate) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let tasks = select_due(BufReader::new(file), date).map_err(|e| Error::io(path, e))?;
    info!("{} task(s) due {} in {}: {:?}", tasks.len(), date, path.display(), tasks);
    Ok(tasks)
}
