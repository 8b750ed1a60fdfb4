use std::path::Path;
use std::sync::OnceLock;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ExtractError;
use crate::parser::extract::date::DateLabels;

/// Vocabulary and defaults the extractor works against.
///
/// Every field has a default, so a config file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vendor name stamped on records when the caller does not supply one.
    pub vendor: String,
    /// Placeholder written to `release_date` when no date could be parsed.
    pub unknown_date: String,
    /// Labels that precede the release date, matched case-insensitively.
    pub date_labels: Vec<String>,
    /// Heading fragments that mark an installer/utility section.
    pub installer_markers: Vec<String>,
    /// File extensions that identify a firmware binary download.
    pub firmware_extensions: Vec<String>,
    /// Built from `date_labels` on first use.
    #[serde(skip)]
    label_matcher: OnceLock<DateLabels>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            vendor: "Linksys".to_string(),
            unknown_date: "unknown".to_string(),
            date_labels: to_strings(&[
                "Datum der letzten Version",
                "Latest Release Date",
                "Release Date",
                "Date de la dernière version",
                "Fecha de la última versión",
            ]),
            installer_markers: to_strings(&[
                "Installation Tool",
                "Installationstool",
                "Setup Tool",
                "Utility",
                "Outil d'installation",
            ]),
            firmware_extensions: to_strings(&[".img", ".bin", ".trx", ".chk", ".zip", ".tar", ".gz"]),
            label_matcher: OnceLock::new(),
        }
    }
}

impl Settings {
    /// Defaults, then the optional file, then `FW_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Settings, ExtractError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("FW"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Compiled date-label matcher. Edits to `date_labels` after the first call are not seen.
    pub fn date_label_matcher(&self) -> &DateLabels {
        self.label_matcher
            .get_or_init(|| DateLabels::new(&self.date_labels))
    }

    pub fn is_installer_heading(&self, heading: &str) -> bool {
        let heading = heading.to_lowercase();
        self.installer_markers
            .iter()
            .any(|m| heading.contains(&m.to_lowercase()))
    }

    pub fn is_firmware_path(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        self.firmware_extensions
            .iter()
            .any(|ext| path.ends_with(&ext.to_lowercase()))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
