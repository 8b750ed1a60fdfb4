pub mod date;
pub mod url;
pub mod version;

use chrono::NaiveDate;
use tracing::debug;

use super::sections::RawSection;
use crate::settings::Settings;

/// What one section says about a release. Only `version` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub heading: String,
    pub version: String,
    pub build: Option<String>,
    pub raw_date: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub url: Option<String>,
}

/// Pull version, date and firmware URL out of a section.
///
/// Sections without a version token are not release text and yield `None`. A missing
/// date or URL leaves that field empty.
pub fn extract_entry(section: &RawSection, settings: &Settings) -> Option<CandidateEntry> {
    let text = section.match_text();

    let Some(version) = version::find_version(&text) else {
        debug!(heading = %section.heading, "no version token, skipping section");
        return None;
    };

    let date = match date::find_release_date(&text, settings.date_label_matcher()) {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(heading = %section.heading, "{}", e);
            None
        }
    };

    let url = url::find_firmware_url(section.links(), settings).map(str::to_string);

    Some(CandidateEntry {
        heading: section.heading.clone(),
        version: version.version,
        build: version.build,
        raw_date: date.as_ref().map(|d| d.raw.clone()),
        release_date: date.map(|d| d.date),
        url,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sections::segment;

    fn entries(markup: &str) -> Vec<Option<CandidateEntry>> {
        let settings = Settings::default();
        segment(markup)
            .iter()
            .map(|s| extract_entry(s, &settings))
            .collect()
    }

    #[test]
    fn full_entry() {
        let e = entries(
            r#"<h3>Firmware (für USA)</h3>Ver.1.203.23 (build 20394)<br>Datum der letzten Version: 08/23/2019<br><a href="http://downloads.example.com/FW_X_1.203.23.20394_prod.gpg.img">Herunterladen</a>"#,
        );
        let e = e[0].as_ref().unwrap();
        assert_eq!(e.heading, "Firmware (für USA)");
        assert_eq!(e.version, "1.203.23");
        assert_eq!(e.build.as_deref(), Some("20394"));
        assert_eq!(e.raw_date.as_deref(), Some("08/23/2019"));
        assert_eq!(e.release_date, NaiveDate::from_ymd_opt(2019, 8, 23));
        assert_eq!(
            e.url.as_deref(),
            Some("http://downloads.example.com/FW_X_1.203.23.20394_prod.gpg.img")
        );
    }

    #[test]
    fn missing_date_is_tolerated() {
        let e = entries(r#"<h3>Firmware</h3>Ver.2.0<a href="/fw.img">x</a>"#);
        let e = e[0].as_ref().unwrap();
        assert_eq!(e.release_date, None);
        assert_eq!(e.raw_date, None);
        assert_eq!(e.url.as_deref(), Some("/fw.img"));
    }

    #[test]
    fn license_only_section_yields_nothing() {
        let e = entries(r#"<h3>Lizenz</h3><a href="/de/support-article?articleNum=4321">Lizensvereinbarung</a>"#);
        assert_eq!(e, vec![None]);
    }

    #[test]
    fn installer_entry_has_no_firmware_url() {
        let e = entries(
            r#"<h3>Installation Tool</h3>Ver.1.1.0<br>Datum der letzten Version: 02/01/2018<a href="http://x/FW.exe">x</a>"#,
        );
        let e = e[0].as_ref().unwrap();
        assert_eq!(e.version, "1.1.0");
        assert_eq!(e.url, None);
    }

    #[test]
    fn date_inside_anchor() {
        let e = entries(
            r#"<h3>Firmware</h3>Ver.2.03.21 Release Date: <a href="/notes">02/05/2018</a><a href="/x.img">d</a>"#,
        );
        let e = e[0].as_ref().unwrap();
        assert_eq!(e.raw_date.as_deref(), Some("02/05/2018"));
        assert_eq!(e.release_date, NaiveDate::from_ymd_opt(2018, 2, 5));
        assert_eq!(e.url.as_deref(), Some("/x.img"));
    }

    #[test]
    fn version_inside_anchor() {
        let e = entries(r#"<h3>Firmware</h3><a href="/x.img">Ver.2.03.21</a>"#);
        let e = e[0].as_ref().unwrap();
        assert_eq!(e.version, "2.03.21");
        assert_eq!(e.url.as_deref(), Some("/x.img"));
    }

    #[test]
    fn nested_date_in_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/article_downloads.html").unwrap();
        let e = entries(&html);
        let regions = e[1].as_ref().unwrap();
        assert_eq!(regions.heading, "Firmware (für andere Regionen)");
        assert_eq!(regions.release_date, NaiveDate::from_ymd_opt(2018, 2, 5));
        assert_eq!(
            regions.url.as_deref(),
            Some("http://downloads.example.com/downloads/firmware/FW_EA6300_2.03.21_prod.img")
        );
    }
}
