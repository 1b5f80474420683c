use super::{
    MasteryStatus,
    MasteryTracker,
};
use crate::core::Sentence;

/// Weak-first rank. Unrated sits between unsure and know so fresh material
/// surfaces before well-known cards but after everything the user missed.
pub fn mastery_rank(status: Option<MasteryStatus>) -> u8 {
    match status {
        Some(MasteryStatus::DontKnow) => 0,
        Some(MasteryStatus::Unsure) => 1,
        None => 2,
        Some(MasteryStatus::Know) => 3,
    }
}

/// Stable sort by mastery rank; ties keep their original order.
pub fn sort_by_mastery(sentences: &mut [Sentence], tracker: &dyn MasteryTracker) {
    sentences.sort_by_key(|sentence| mastery_rank(tracker.status(&sentence.kr)));
}
