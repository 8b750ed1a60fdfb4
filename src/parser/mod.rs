pub mod blocks;
pub mod classify;
pub mod extract;
pub mod sections;

use tracing::{debug, info};

use crate::record::{self, DeviceContext, FirmwareRecord};
use crate::registry::{ArtifactRegistry, DedupKey};
use crate::settings::Settings;
use classify::ClassifiedEntry;

/// Every section that looks like a release, classified, in document order.
pub fn extract_candidates(markup: &str, settings: &Settings) -> Vec<ClassifiedEntry> {
    sections::segment(markup)
        .iter()
        .filter_map(|s| extract::extract_entry(s, settings))
        .map(|e| classify::classify(e, settings))
        .collect()
}

/// Full pipeline: markup → sections → entries → records, skipping artifacts `registry` has seen.
pub fn process_article<R: ArtifactRegistry>(
    markup: &str,
    ctx: &DeviceContext,
    registry: &mut R,
    settings: &Settings,
) -> Vec<FirmwareRecord> {
    let candidates = extract_candidates(markup, settings);
    let total = candidates.len();
    let mut records = Vec::new();

    for entry in candidates.iter().filter(|e| e.is_firmware()) {
        if !registry.register_if_new(DedupKey::for_entry(entry)) {
            debug!(
                device = %ctx.device_name,
                heading = %entry.entry.heading,
                url = ?entry.entry.url,
                "duplicate artifact dropped"
            );
            continue;
        }
        records.extend(record::assemble(entry, ctx, settings));
    }

    info!(
        device = %ctx.device_name,
        candidates = total,
        records = records.len(),
        "article processed"
    );
    records
}

// ── Tests ──
