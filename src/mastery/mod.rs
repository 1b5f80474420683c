pub mod sort;
pub mod store;

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

pub use store::{
    MasteryRecord,
    MasteryStore,
};
use crate::core::Sentence;

/// Self-reported familiarity with a sentence. "Unrated" is the absence of a
/// record, not a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryStatus {
    DontKnow,
    Unsure,
    Know,
}

/// Narrow seam to whatever owns the mastery records, keyed by sentence text.
pub trait MasteryTracker {
    fn status(&self, text: &str) -> Option<MasteryStatus>;

    fn track_response(
        &mut self,
        text: &str,
        translation: &str,
        status: MasteryStatus,
        category: &str,
        subcategory: &str,
    );
}

/// In-memory tracker with no persistence, for headless use and tests.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    statuses: HashMap<String, MasteryStatus>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, text: &str, status: MasteryStatus) {
        self.statuses.insert(text.to_string(), status);
    }
}

impl MasteryTracker for MemoryTracker {
    fn status(&self, text: &str) -> Option<MasteryStatus> {
        self.statuses.get(text).copied()
    }

    fn track_response(
        &mut self,
        text: &str,
        _translation: &str,
        status: MasteryStatus,
        _category: &str,
        _subcategory: &str,
    ) {
        self.set(text, status);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MasteryCounts {
    pub know: usize,
    pub unsure: usize,
    pub dont_know: usize,
}

/// Per-deck stat line shown under the card.
pub fn count_statuses(sentences: &[Sentence], tracker: &dyn MasteryTracker) -> MasteryCounts {
    let mut counts = MasteryCounts::default();
    for sentence in sentences {
        match tracker.status(&sentence.kr) {
            Some(MasteryStatus::Know) => counts.know += 1,
            Some(MasteryStatus::Unsure) => counts.unsure += 1,
            Some(MasteryStatus::DontKnow) => counts.dont_know += 1,
            None => {}
        }
    }
    counts
}
