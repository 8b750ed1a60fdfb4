use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::parser::classify::ClassifiedEntry;

/// Identity of a firmware artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Url(String),
    VersionDate {
        version: String,
        raw_date: Option<String>,
    },
}

impl DedupKey {
    /// The download URL (trimmed, fragment dropped) or, without one, version plus raw date.
    pub fn for_entry(entry: &ClassifiedEntry) -> DedupKey {
        match entry.entry.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => {
                // the query stays, it can select a different file
                let without_fragment = url.split('#').next().unwrap_or(url);
                DedupKey::Url(without_fragment.to_string())
            }
            None => DedupKey::VersionDate {
                version: entry.entry.version.clone(),
                raw_date: entry.entry.raw_date.clone(),
            },
        }
    }
}

/// Anything that can answer "first time we see this artifact?".
pub trait ArtifactRegistry {
    /// Marks `key` as seen. True only on the first call for a given key.
    fn register_if_new(&mut self, key: DedupKey) -> bool;
}

/// Seen-set for one crawl session. Entries are never evicted.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    seen: HashSet<DedupKey>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl ArtifactRegistry for DedupRegistry {
    fn register_if_new(&mut self, key: DedupKey) -> bool {
        self.seen.insert(key)
    }
}

/// A registry shared by concurrent workers. Test-and-set happens under one lock.
#[derive(Debug, Default)]
pub struct SharedRegistry {
    inner: Mutex<DedupRegistry>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.lock().contains(key)
    }

    pub fn into_inner(self) -> DedupRegistry {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // the set is still valid if a holder panicked
    fn lock(&self) -> std::sync::MutexGuard<'_, DedupRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ArtifactRegistry for &SharedRegistry {
    fn register_if_new(&mut self, key: DedupKey) -> bool {
        self.lock().register_if_new(key)
    }
}
