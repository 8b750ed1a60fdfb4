use std::sync::LazyLock;

use regex::Regex;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bVer\.\s*(\d+(?:\.\d+){1,3})").unwrap());
static BUILD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*\(\s*build\s+(\d+)\s*\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken {
    pub version: String,
    pub build: Option<String>,
}

/// First `Ver.x.y[.z[.w]]` token in `text`, with its optional `(build N)` qualifier.
pub fn find_version(text: &str) -> Option<VersionToken> {
    VERSION_RE.captures_iter(text).find_map(|caps| {
        let m = caps.get(1)?;
        let rest = &text[m.end()..];
        if has_extra_component(rest) {
            return None;
        }
        let build = BUILD_RE.captures(rest).map(|c| c[1].to_string());
        Some(VersionToken {
            version: m.as_str().to_string(),
            build,
        })
    })
}

// 1.2.3.4.5 has too many components to be a version
fn has_extra_component(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_with_build() {
        let v = find_version("Ver.1.203.23 (build 20394)").unwrap();
        assert_eq!(v.version, "1.203.23");
        assert_eq!(v.build.as_deref(), Some("20394"));
    }

    #[test]
    fn plain_version() {
        let v = find_version("Ver.2.03.21\nDatum der letzten Version: 02/05/2018").unwrap();
        assert_eq!(v.version, "2.03.21");
        assert_eq!(v.build, None);
    }

    #[test]
    fn two_and_four_components() {
        assert_eq!(find_version("Ver. 1.0").unwrap().version, "1.0");
        assert_eq!(find_version("ver.1.0.2.7").unwrap().version, "1.0.2.7");
    }

    #[test]
    fn rejects_single_and_five_components() {
        assert_eq!(find_version("Ver.7"), None);
        assert_eq!(find_version("Ver.1.2.3.4.5"), None);
    }

    #[test]
    fn skips_bad_token_for_later_one() {
        let v = find_version("Ver.1.2.3.4.5 then Ver.3.1").unwrap();
        assert_eq!(v.version, "3.1");
    }

    #[test]
    fn version_word_is_not_a_token() {
        assert_eq!(find_version("Datum der letzten Version: 08/23/2019"), None);
    }

    #[test]
    fn trailing_period_is_fine() {
        assert_eq!(find_version("Ver.1.1.0.").unwrap().version, "1.1.0");
    }
}
