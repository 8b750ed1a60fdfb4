//! Firmware release extraction for vendor support articles.
//!
//! An article's download block is split at its headings, each section is mined for a
//! version, release date and binary URL, installer and license sections are filtered
//! out, and every firmware artifact is emitted once per registry lifetime.

pub mod error;
pub mod parser;
pub mod record;
pub mod registry;
pub mod settings;

pub use error::ExtractError;
pub use parser::classify::{Category, ClassifiedEntry};
pub use parser::extract::CandidateEntry;
pub use parser::sections::RawSection;
pub use parser::{extract_candidates, process_article as extract_records};
pub use record::{DeviceContext, FirmwareRecord, PipelineItem};
pub use registry::{ArtifactRegistry, DedupKey, DedupRegistry, SharedRegistry};
pub use settings::Settings;
