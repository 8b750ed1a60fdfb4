use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// No label was found, or no valid date token follows it.
    #[error("no release date after any of the labels {labels:?}")]
    DateNotFound { labels: Vec<String> },

    #[error("failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),
}
