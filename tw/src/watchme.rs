//! WatchMe configuration document
//!
//! The schema is owned by the WatchMe timer application. Every field is kept
//! as an opaque string; only `Timer::name` and `Timer::timer_guid` are ever
//! inspected or changed here. Settings, alerts and categories are carried
//! through untouched, and every text value is written back exactly as it was
//! read, surrounding whitespace included.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, ParseError, Result};
use crate::xml;

/// Declaration written at the top of every saved config
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Root element of a WatchMe configuration file
pub const ROOT_ELEMENT: &str = "ConfigurationData";

/// Element name of a timer record, also the root of a template file
pub const TIMER_ELEMENT: &str = "Timers";

/// Root of a WatchMe configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "ConfigurationData")]
pub struct ConfigurationData {
    /// Default namespace of the document, written back verbatim
    #[serde(rename = "@xmlns", skip_serializing_if = "Option::is_none")]
    pub xmlns: Option<String>,

    #[serde(rename = "Timers")]
    pub timers: Vec<Timer>,

    #[serde(rename = "Settings")]
    pub settings: Vec<Setting>,

    #[serde(rename = "TimerAlerts")]
    pub timer_alerts: Vec<TimerAlert>,

    #[serde(rename = "Categories")]
    pub categories: Vec<Category>,
}

/// One timer entry (a `Timers` element)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Timers", rename_all = "PascalCase", default)]
pub struct Timer {
    #[serde(rename = "TimerGUID")]
    pub timer_guid: String,
    pub current_ticks: String,
    pub name: String,
    pub note: String,
    pub autostart: String,
    pub autoreset: String,
    pub hotkey: String,
    pub category: String,
    pub note_height: String,
    pub note_width: String,
    pub flag_icon: String,
    pub is_countdown: String,
    pub default_ticks: String,
    pub last_start: String,
    pub last_stop: String,
    pub last_reset: String,
    pub control_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Settings", rename_all = "PascalCase", default)]
pub struct Setting {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "TimerAlerts", rename_all = "PascalCase", default)]
pub struct TimerAlert {
    #[serde(rename = "TimerAlertGUID")]
    pub timer_alert_guid: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub display_message_on_alert: String,
    pub stop_after_alert: String,
    pub beep_on_alert: String,
    pub launch_app_on_alert: String,
    pub launch_path: String,
    pub play_sound_on_alert: String,
    pub sound_path: String,
    #[serde(rename = "TimerGUID")]
    pub timer_guid: String,
    pub start_stop_other_timer_countdown: String,
    #[serde(rename = "StartStopOtherTimerCountdownGUID")]
    pub start_stop_other_timer_countdown_guid: String,
    pub restart: String,
    pub reset: String,
    pub increment_counter: String,
    #[serde(rename = "IncrementCounterGUID")]
    pub increment_counter_guid: String,
    pub decrement_counter: String,
    #[serde(rename = "DecrementCounterGUID")]
    pub decrement_counter_guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Categories", rename_all = "PascalCase", default)]
pub struct Category {
    pub name: String,
    pub order: String,
}

impl ConfigurationData {
    /// Parse a configuration document; unknown top-level elements are ignored
    pub fn from_xml(source: &str) -> std::result::Result<Self, ParseError> {
        let doc = xml::read_document(source, ROOT_ELEMENT)?;
        let mut data = ConfigurationData {
            xmlns: doc.xmlns,
            ..Default::default()
        };

        for (name, fields) in doc.records {
            match name.as_str() {
                TIMER_ELEMENT => data.timers.push(xml::from_fields(fields)?),
                "Settings" => data.settings.push(xml::from_fields(fields)?),
                "TimerAlerts" => data.timer_alerts.push(xml::from_fields(fields)?),
                "Categories" => data.categories.push(xml::from_fields(fields)?),
                other => debug!("Ignoring <{}> in WatchMe config", other),
            }
        }

        Ok(data)
    }

    /// Render the document with an XML declaration and two-space indentation
    pub fn to_xml(&self) -> Result<String> {
        let mut out = String::from(XML_DECLARATION);
        out.push('\n');
        let mut ser = quick_xml::se::Serializer::new(&mut out);
        ser.indent(' ', 2);
        self.serialize(ser)?;
        out.push('\n');
        Ok(out)
    }

    /// Check whether a timer with exactly this name exists
    pub fn has_timer(&self, name: &str) -> bool {
        self.timers.iter().any(|t| t.name == name)
    }
}

impl Timer {
    /// Parse a single timer entry, as found in a template file
    pub fn from_xml(source: &str) -> std::result::Result<Self, ParseError> {
        xml::from_fields(xml::read_single_record(source, TIMER_ELEMENT)?)
    }

    /// Clone `self` as a new timer with the given name and identifier
    pub fn instantiate(&self, name: &str, timer_guid: String) -> Timer {
        Timer {
            timer_guid,
            name: name.to_string(),
            ..self.clone()
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Load and parse the WatchMe configuration at `path`
pub fn load_config(path: &Path) -> Result<ConfigurationData> {
    let content = read_file(path)?;
    let data = ConfigurationData::from_xml(&content).map_err(|e| Error::parse(path, e))?;
    debug!(
        "Loaded {}: {} timers, {} settings, {} alerts, {} categories",
        path.display(),
        data.timers.len(),
        data.settings.len(),
        data.timer_alerts.len(),
        data.categories.len()
    );
    Ok(data)
}

/// Load and parse the timer template at `path`
pub fn load_template(path: &Path) -> Result<Timer> {
    let content = read_file(path)?;
    Timer::from_xml(&content).map_err(|e| Error::parse(path, e))
}

/// Path of the backup kept for the config at `path` (`<path>.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(crate::BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Replace the config at `path` with `data`, keeping the previous file as
/// `<path>.bak`.
///
/// The old file is moved aside with a rename, so either the original or the
/// backup exists at every point. If the final write fails only the backup is
/// left. Returns the backup path.
pub fn save_with_backup(data: &ConfigurationData, path: &Path) -> Result<PathBuf> {
    let rendered = data.to_xml()?;
    let backup = backup_path(path);

    match fs::remove_file(&backup) {
        Ok(()) => debug!("Removed stale backup {}", backup.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(&backup, e)),
    }

    fs::rename(path, &backup).map_err(|e| Error::io(path, e))?;
    info!("Backed up {} to {}", path.display(), backup.display());

    fs::write(path, rendered).map_err(|e| Error::io(path, e))?;
    info!("Wrote {} timers to {}", data.timers.len(), path.display());

    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = include_str!("../tests/fixtures/WatchMeConfig.xml");
    const TEMPLATE: &str = include_str!("../tests/fixtures/template.xml");

    #[test]
    fn test_parse_config() {
        let data = ConfigurationData::from_xml(CONFIG).unwrap();

        assert_eq!(data.xmlns.as_deref(), Some("http://tempuri.org/ConfigurationData.xsd"));
        assert_eq!(data.timers.len(), 2);
        assert_eq!(data.timers[0].name, "Write report");
        assert_eq!(data.timers[0].note, "Quarterly numbers & charts");
        assert_eq!(data.timers[1].note, "  Reply to Alice\nthen Bob  ");
        assert_eq!(data.timers[1].default_ticks, "9000000000");
        assert_eq!(data.settings.len(), 2);
        assert_eq!(data.timer_alerts.len(), 1);
        assert_eq!(data.timer_alerts[0].minutes, "25");
        assert_eq!(data.timer_alerts[0].sound_path, r" C:\Windows\Media\chimes.wav ");
        assert_eq!(data.timer_alerts[0].launch_path, "");
        assert_eq!(data.timer_alerts[0].timer_guid, data.timers[0].timer_guid);
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.categories[1].name, "Home");
    }

    #[test]
    fn test_parse_template() {
        let template = Timer::from_xml(TEMPLATE).unwrap();
        assert_eq!(template.name, "Template1");
        assert_eq!(template.category, "Todo");
        assert_eq!(template.is_countdown, "true");
        assert_eq!(template.default_ticks, "15000000000");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let timer = Timer::from_xml("<Timers><Name>Only a name</Name></Timers>").unwrap();
        assert_eq!(timer.name, "Only a name");
        assert_eq!(timer.timer_guid, "");
        assert_eq!(timer.control_type, "");

        let data = ConfigurationData::from_xml("<ConfigurationData></ConfigurationData>").unwrap();
        assert_eq!(data, ConfigurationData::default());
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(ConfigurationData::from_xml("<ConfigurationData><Timers><Name>x</Timers>").is_err());
        assert!(Timer::from_xml("not xml at all <<<").is_err());
    }

    #[test]
    fn test_wrong_root_element_is_an_error() {
        assert!(matches!(
            ConfigurationData::from_xml(TEMPLATE).unwrap_err(),
            ParseError::UnexpectedRoot { .. }
        ));
        assert!(matches!(
            Timer::from_xml(CONFIG).unwrap_err(),
            ParseError::UnexpectedRoot { .. }
        ));
    }

    #[test]
    fn test_unknown_top_level_elements_are_ignored() {
        let data = ConfigurationData::from_xml(
            "<ConfigurationData><Counters><Value>3</Value></Counters><Timers><Name>a</Name></Timers></ConfigurationData>",
        )
        .unwrap();
        assert_eq!(data.timers.len(), 1);
        assert_eq!(data.timers[0].name, "a");
    }

    #[test]
    fn test_whitespace_survives_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("WatchMeConfig.xml");
        fs::write(&path, CONFIG).unwrap();

        let mut data = load_config(&path).unwrap();
        data.timers.push(Timer {
            name: "Buy milk ".to_string(),
            note: "  indented note ".to_string(),
            ..Default::default()
        });
        save_with_backup(&data, &path).unwrap();

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded, data);
        assert_eq!(reloaded.timers[1].note, "  Reply to Alice\nthen Bob  ");
        assert_eq!(reloaded.timer_alerts[0].sound_path, r" C:\Windows\Media\chimes.wav ");
        assert_eq!(reloaded.timers[2].name, "Buy milk ");
        assert_eq!(reloaded.timers[2].note, "  indented note ");
        assert!(reloaded.has_timer("Buy milk "));
        assert!(!reloaded.has_timer("Buy milk"));
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let data = ConfigurationData::from_xml(CONFIG).unwrap();
        let xml = data.to_xml().unwrap();

        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<ConfigurationData"));
        assert!(xml.contains("Quarterly numbers &amp; charts"));

        let reparsed = ConfigurationData::from_xml(&xml).unwrap();
        assert_eq!(reparsed, data);
    }

    #[test]
    fn test_instantiate_replaces_identity_only() {
        let template = Timer::from_xml(TEMPLATE).unwrap();
        let timer = template.instantiate("Buy milk", "abcd".to_string());

        assert_eq!(timer.name, "Buy milk");
        assert_eq!(timer.timer_guid, "abcd");
        assert_eq!(
            Timer {
                name: template.name.clone(),
                timer_guid: template.timer_guid.clone(),
                ..timer
            },
            template
        );
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("dir/WatchMeConfig.xml")),
            PathBuf::from("dir/WatchMeConfig.xml.bak")
        );
    }

    #[test]
    fn test_save_with_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("WatchMeConfig.xml");
        fs::write(&path, CONFIG).unwrap();
        fs::write(backup_path(&path), "stale").unwrap();

        let mut data = load_config(&path).unwrap();
        data.timers.truncate(1);

        let backup = save_with_backup(&data, &path).unwrap();

        assert_eq!(backup, backup_path(&path));
        assert_eq!(fs::read_to_string(&backup).unwrap(), CONFIG);
        assert_eq!(load_config(&path).unwrap(), data);
    }

    #[test]
    fn test_save_with_backup_fails_when_config_is_gone() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("WatchMeConfig.xml");

        let err = save_with_backup(&ConfigurationData::default(), &path).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_save_with_backup_keeps_config_when_backup_cannot_be_removed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("WatchMeConfig.xml");
        fs::write(&path, CONFIG).unwrap();
        let backup = backup_path(&path);
        fs::create_dir(&backup).unwrap();
        fs::write(backup.join("keep.txt"), "occupied").unwrap();

        let err = save_with_backup(&ConfigurationData::default(), &path).unwrap_err();

        match err {
            Error::Io { path: p, .. } => assert_eq!(p, backup),
            other => panic!("expected I/O error on the backup, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG);
        assert!(backup.join("keep.txt").exists());
    }

    #[test]
    fn test_load_config_reports_parse_error_with_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.xml");
        fs::write(&path, "<ConfigurationData><Timers>").unwrap();

        let err = load_config(&path).unwrap_err();
        match err {
            Error::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
