//! Merge due tasks into the timer list

use log::{debug, info};
use std::collections::HashSet;

use crate::guid;
use crate::watchme::{ConfigurationData, Timer};

/// What a merge did with each task line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Names of the timers that were added, in task order
    pub added: Vec<String>,
    /// Task lines that already had a timer with the same name
    pub skipped: Vec<String>,
}

/// Add a timer for every task that has no timer of the same name yet.
///
/// New timers are clones of `template` with the task as `Name` and a fresh
/// `TimerGUID`. Existing timers are never modified. A task repeated in `tasks`
/// is added once.
pub fn merge_tasks<S: AsRef<str>>(data: &mut ConfigurationData, template: &Timer, tasks: &[S]) -> MergeReport {
    let mut names: HashSet<String> = data.timers.iter().map(|t| t.name.clone()).collect();
    let mut guids: HashSet<String> = data.timers.iter().map(|t| t.timer_guid.clone()).collect();
    let mut report = MergeReport::default();

    for task in tasks {
        let name = task.as_ref();
        if names.contains(name) {
            debug!("Timer already exists: {}", name);
            report.skipped.push(name.to_string());
            continue;
        }

        let timer_guid = unique_guid(&mut guids);
        info!("Adding timer {:?} ({})", name, timer_guid);
        data.timers.push(template.instantiate(name, timer_guid));
        names.insert(name.to_string());
        report.added.push(name.to_string());
    }

    report
}

fn unique_guid(taken: &mut HashSet<String>) -> String {
    loop {
        let candidate = guid::new_guid();
        if taken.insert(candidate.clone()) {
            return candidate;
        }
    }
}

/// Sort timers by name, keeping the input order of equal names
pub fn sort_timers(data: &mut ConfigurationData) {
    data.timers.sort_by(|a, b| a.name.cmp(&b.name));
}
