use serde::{Deserialize, Serialize};

use crate::parser::classify::ClassifiedEntry;
use crate::settings::Settings;

/// Per-device facts carried down the crawl chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceContext {
    pub device_name: String,
    pub device_class: String,
    pub vendor: String,
}

/// One firmware artifact, ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirmwareRecord {
    pub device_name: String,
    pub device_class: String,
    pub firmware_version: String,
    pub release_date: String,
    pub file_url: String,
    pub vendor: String,
}

/// Build a record from an accepted firmware entry.
///
/// Returns `None` for entries that are not firmware binaries or carry no URL.
pub fn assemble(
    entry: &ClassifiedEntry,
    ctx: &DeviceContext,
    settings: &Settings,
) -> Option<FirmwareRecord> {
    if !entry.is_firmware() {
        return None;
    }
    let file_url = entry.entry.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;

    let release_date = entry
        .entry
        .release_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| settings.unknown_date.clone());

    Some(FirmwareRecord {
        device_name: ctx.device_name.clone(),
        device_class: ctx.device_class.clone(),
        firmware_version: entry.entry.version.clone(),
        release_date,
        file_url: file_url.to_string(),
        vendor: ctx.vendor.clone(),
    })
}

/// The download pipeline's item shape: every field a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineItem {
    pub file_urls: Vec<String>,
    pub vendor: Vec<String>,
    pub device_name: Vec<String>,
    pub firmware_version: Vec<String>,
    pub device_class: Vec<String>,
    pub release_date: Vec<String>,
}

impl From<FirmwareRecord> for PipelineItem {
    fn from(r: FirmwareRecord) -> Self {
        PipelineItem {
            file_urls: vec![r.file_url],
            vendor: vec![r.vendor],
            device_name: vec![r.device_name],
            firmware_version: vec![r.firmware_version],
            device_class: vec![r.device_class],
            release_date: vec![r.release_date],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify::Category;
    use crate::parser::extract::CandidateEntry;
    use chrono::NaiveDate;

    fn ctx() -> DeviceContext {
        DeviceContext {
            device_name: "EA6300".into(),
            device_class: "Router".into(),
            vendor: "Linksys".into(),
        }
    }

    fn accepted(date: Option<NaiveDate>) -> ClassifiedEntry {
        ClassifiedEntry {
            entry: CandidateEntry {
                heading: "Firmware (für USA)".into(),
                version: "1.203.23".into(),
                build: Some("20394".into()),
                raw_date: date.map(|d| d.format("%m/%d/%Y").to_string()),
                release_date: date,
                url: Some("http://downloads.example.com/FW_EA6300_1.203.23.20394_prod.gpg.img".into()),
            },
            category: Category::FirmwareBinary,
        }
    }

    #[test]
    fn assembles_scalar_record() {
        let r = assemble(&accepted(NaiveDate::from_ymd_opt(2019, 8, 23)), &ctx(), &Settings::default()).unwrap();
        assert_eq!(
            r,
            FirmwareRecord {
                device_name: "EA6300".into(),
                device_class: "Router".into(),
                firmware_version: "1.203.23".into(),
                release_date: "2019-08-23".into(),
                file_url: "http://downloads.example.com/FW_EA6300_1.203.23.20394_prod.gpg.img".into(),
                vendor: "Linksys".into(),
            }
        );
    }

    #[test]
    fn missing_date_uses_sentinel() {
        let r = assemble(&accepted(None), &ctx(), &Settings::default()).unwrap();
        assert_eq!(r.release_date, "unknown");
    }

    #[test]
    fn non_firmware_not_assembled() {
        let mut e = accepted(None);
        e.category = Category::InstallerTool;
        assert!(assemble(&e, &ctx(), &Settings::default()).is_none());
    }

    #[test]
    fn pipeline_item_wraps_every_field() {
        let r = assemble(&accepted(NaiveDate::from_ymd_opt(2019, 8, 23)), &ctx(), &Settings::default()).unwrap();
        let item = PipelineItem::from(r);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "file_urls": ["http://downloads.example.com/FW_EA6300_1.203.23.20394_prod.gpg.img"],
                "vendor": ["Linksys"],
                "device_name": ["EA6300"],
                "firmware_version": ["1.203.23"],
                "device_class": ["Router"],
                "release_date": ["2019-08-23"],
            })
        );
    }
}
