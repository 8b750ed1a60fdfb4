use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ExtractError;

static DATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(\d{1,2})/(\d{1,2})/(\d{4})|(\d{4})-(\d{2})-(\d{2})|(\d{1,2})\.(\d{1,2})\.(\d{4}))\b")
        .unwrap()
});

/// A release date and the token it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateToken {
    pub raw: String,
    pub date: NaiveDate,
}

/// Case-insensitive matcher for the labels that precede a release date, compiled once.
#[derive(Debug, Clone)]
pub struct DateLabels {
    labels: Vec<String>,
    re: Option<Regex>,
}

impl DateLabels {
    pub fn new(labels: &[String]) -> Self {
        let mut alternatives: Vec<&String> = labels.iter().filter(|l| !l.is_empty()).collect();
        // longest first, so "Latest Release Date" beats "Release Date" at the same offset
        alternatives.sort_by_key(|l| std::cmp::Reverse(l.len()));
        let pattern = alternatives
            .iter()
            .map(|l| regex::escape(l))
            .collect::<Vec<_>>()
            .join("|");
        let re = if pattern.is_empty() {
            None
        } else {
            Regex::new(&format!("(?i){}", pattern)).ok()
        };
        DateLabels {
            labels: labels.to_vec(),
            re,
        }
    }

    /// Byte offset just past the earliest label occurrence.
    fn end_of_first(&self, text: &str) -> Option<usize> {
        self.re.as_ref()?.find(text).map(|m| m.end())
    }
}

/// Find the first label in `text`, then the first valid date anywhere after it.
///
/// The date may sit on a later line than the label, since nested markup splits the two
/// into separate text runs. Date-shaped tokens that are not real calendar dates are
/// skipped rather than ending the search with `DateNotFound`.
pub fn find_release_date(text: &str, labels: &DateLabels) -> Result<DateToken, ExtractError> {
    let not_found = || ExtractError::DateNotFound {
        labels: labels.labels.clone(),
    };

    let after_label = labels.end_of_first(text).ok_or_else(not_found)?;
    DATE_TOKEN_RE
        .captures_iter(&text[after_label..])
        .find_map(|caps| {
            // MM/DD/YYYY, YYYY-MM-DD, DD.MM.YYYY
            let date = if caps.get(1).is_some() {
                ymd(&caps[3], &caps[1], &caps[2])
            } else if caps.get(4).is_some() {
                ymd(&caps[4], &caps[5], &caps[6])
            } else {
                ymd(&caps[9], &caps[8], &caps[7])
            }?;
            Some(DateToken {
                raw: caps[0].to_string(),
                date,
            })
        })
        .ok_or_else(not_found)
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
