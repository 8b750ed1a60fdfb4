use serde::Serialize;
use tracing::debug;

use super::extract::CandidateEntry;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FirmwareBinary,
    InstallerTool,
    LicenseOrOther,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub entry: CandidateEntry,
    pub category: Category,
}

impl ClassifiedEntry {
    pub fn is_firmware(&self) -> bool {
        self.category == Category::FirmwareBinary
    }
}

/// Installer heading first, then binary URL, else other.
pub fn classify(entry: CandidateEntry, settings: &Settings) -> ClassifiedEntry {
    let category = if settings.is_installer_heading(&entry.heading) {
        if entry.url.is_some() {
            debug!(heading = %entry.heading, "installer heading with a firmware link, treating as installer");
        }
        Category::InstallerTool
    } else if entry.url.is_some() {
        Category::FirmwareBinary
    } else {
        Category::LicenseOrOther
    };

    ClassifiedEntry { entry, category }
}
