use rand::seq::SliceRandom;

use crate::{
    core::{
        Dataset,
        Sentence,
    },
    mastery::{
        sort::sort_by_mastery,
        MasteryStatus,
        MasteryTracker,
    },
};

/// How far behind the cursor a missed card is requeued, so it resurfaces
/// later in the same pass.
pub const REQUEUE_OFFSET: usize = 6;

pub const RESPONSE_CATEGORY: &str = "sentence";
pub const RESPONSE_SUBCATEGORY: &str = "sentence";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    Chapter,
    Pattern,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckFilter {
    Chapter(u32),
    Pattern(String),
}

/// Browsing state over a working copy of the dataset. Shuffling and
/// requeueing touch only the deck, never the canonical index.
pub struct PracticeSession {
    deck: Vec<Sentence>,
    cursor: usize,
    flipped: bool,
    mode: StudyMode,
    filter: Option<DeckFilter>,
}

impl PracticeSession {
    pub fn new(dataset: &Dataset) -> Self {
        let mut session = Self {
            deck: Vec::new(),
            cursor: 0,
            flipped: false,
            mode: StudyMode::Chapter,
            filter: None,
        };
        session.set_mode(StudyMode::Chapter, dataset);
        session
    }

    /// Switches the study mode, clearing any active filter. Chapter and
    /// pattern modes show the full unsorted list until a filter is picked;
    /// random mode deals a fresh shuffle of the full list.
    pub fn set_mode(&mut self, mode: StudyMode, dataset: &Dataset) {
        self.mode = mode;
        self.filter = None;
        self.deck = dataset.sentences().to_vec();

        if mode == StudyMode::Random {
            self.deck.shuffle(&mut rand::rng());
        }

        self.cursor = 0;
        self.flipped = false;
    }

    /// Narrows the deck to one chapter or pattern group, weakest cards first.
    /// An unknown id yields an empty, inert deck.
    pub fn filter_by(&mut self, filter: DeckFilter, dataset: &Dataset, tracker: &dyn MasteryTracker) {
        self.deck = match &filter {
            DeckFilter::Chapter(id) => {
                dataset.chapter(*id).map(|chapter| chapter.sentences.clone()).unwrap_or_default()
            }
            DeckFilter::Pattern(id) => {
                dataset.pattern_group(id).map(<[Sentence]>::to_vec).unwrap_or_default()
            }
        };
        self.filter = Some(filter);

        sort_by_mastery(&mut self.deck, tracker);

        self.cursor = 0;
        self.flipped = false;
    }

    pub fn next(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.deck.len();
        self.flipped = false;
    }

    pub fn prev(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        self.cursor = (self.cursor + self.deck.len() - 1) % self.deck.len();
        self.flipped = false;
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Records the rating for the current card, requeueing a missed card a few
    /// positions later so the deck grows by one. The caller advances to the
    /// next card after its feedback delay. Returns false on an empty deck.
    pub fn record_response(&mut self, status: MasteryStatus, tracker: &mut dyn MasteryTracker) -> bool {
        let Some(sentence) = self.deck.get(self.cursor).cloned() else {
            return false;
        };

        tracker.track_response(
            &sentence.kr,
            &sentence.en,
            status,
            RESPONSE_CATEGORY,
            RESPONSE_SUBCATEGORY,
        );

        if status == MasteryStatus::DontKnow {
            let reinsert_at = (self.cursor + REQUEUE_OFFSET).min(self.deck.len());
            self.deck.insert(reinsert_at, sentence);
        }

        true
    }

    pub fn current(&self) -> Option<&Sentence> {
        self.deck.get(self.cursor)
    }

    pub fn deck(&self) -> &[Sentence] {
        &self.deck
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn filter(&self) -> Option<&DeckFilter> {
        self.filter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::mastery::MemoryTracker;

    fn dataset() -> Dataset {
        Dataset::from_json(
            r#"{
                "chapters": [
                    { "id": 1, "title": "A", "sentences": [
                        { "kr": "하나", "en": "one", "pattern": "p1" },
                        { "kr": "둘", "en": "two", "pattern": "p2" }
                    ] },
                    { "id": 2, "title": "B", "sentences": [
                        { "kr": "셋", "en": "three", "pattern": "p1" },
                        { "kr": "넷", "en": "four" },
                        { "kr": "다섯", "en": "five", "pattern": "p2" }
                    ] }
                ],
                "patterns": [ { "id": "p1", "name": "Pattern one" }, { "id": "p2" } ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn next_composed_len_times_returns_to_start() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        session.next();
        let start = session.cursor();
        for _ in 0..session.len() {
            session.next();
        }
        assert_eq!(session.cursor(), start);
    }

    #[test]
    fn prev_wraps_to_the_end() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        session.prev();
        assert_eq!(session.cursor(), session.len() - 1);
    }

    #[test]
    fn navigation_clears_flip() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        session.flip();
        assert!(session.is_flipped());
        session.next();
        assert!(!session.is_flipped());
        session.flip();
        session.prev();
        assert!(!session.is_flipped());
    }

    #[test]
    fn flip_does_not_move_cursor() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        session.next();
        let cursor = session.cursor();
        session.flip();
        assert_eq!(session.cursor(), cursor);
    }

    #[test]
    fn chapter_filter_yields_exactly_that_chapter() {
        let dataset = dataset();
        let tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        session.filter_by(DeckFilter::Chapter(2), &dataset, &tracker);
        let texts: Vec<&str> = session.deck().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["셋", "넷", "다섯"]);
        assert!(session.deck().iter().all(|s| s.chapter_id == 2));
    }

    #[test]
    fn filtered_deck_is_sorted_by_mastery() {
        let dataset = dataset();
        let mut tracker = MemoryTracker::new();
        tracker.set("셋", MasteryStatus::Know);
        tracker.set("다섯", MasteryStatus::DontKnow);

        let mut session = PracticeSession::new(&dataset);
        session.filter_by(DeckFilter::Chapter(2), &dataset, &tracker);

        let texts: Vec<&str> = session.deck().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["다섯", "넷", "셋"]);
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_flipped());
    }

    #[test]
    fn pattern_filter_uses_the_group() {
        let dataset = dataset();
        let tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        session.filter_by(DeckFilter::Pattern("p1".to_string()), &dataset, &tracker);
        let texts: Vec<&str> = session.deck().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["하나", "셋"]);
    }

    #[test]
    fn unknown_filter_id_yields_inert_empty_deck() {
        let dataset = dataset();
        let tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        session.filter_by(DeckFilter::Chapter(99), &dataset, &tracker);
        assert!(session.is_empty());
        assert!(session.current().is_none());

        // Empty-deck operations are no-ops, not panics.
        session.next();
        session.prev();
        assert_eq!(session.cursor(), 0);

        let mut tracker = MemoryTracker::new();
        assert!(!session.record_response(MasteryStatus::Know, &mut tracker));
    }

    #[test]
    fn set_mode_resets_filter_cursor_and_flip() {
        let dataset = dataset();
        let tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        session.filter_by(DeckFilter::Chapter(1), &dataset, &tracker);
        session.next();
        session.flip();

        session.set_mode(StudyMode::Pattern, &dataset);
        assert_eq!(session.mode(), StudyMode::Pattern);
        assert!(session.filter().is_none());
        assert_eq!(session.len(), dataset.len());
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_flipped());
    }

    #[test]
    fn random_mode_is_a_permutation_of_the_full_list() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        session.set_mode(StudyMode::Random, &dataset);

        assert_eq!(session.len(), dataset.len());

        let mut expected: HashMap<&str, usize> = HashMap::new();
        for sentence in dataset.sentences() {
            *expected.entry(sentence.kr.as_str()).or_default() += 1;
        }
        let mut shuffled: HashMap<&str, usize> = HashMap::new();
        for sentence in session.deck() {
            *shuffled.entry(sentence.kr.as_str()).or_default() += 1;
        }
        assert_eq!(expected, shuffled);
    }

    #[test]
    fn shuffle_leaves_canonical_groups_untouched() {
        let dataset = dataset();
        let mut session = PracticeSession::new(&dataset);
        for _ in 0..10 {
            session.set_mode(StudyMode::Random, &dataset);
        }

        let flat: Vec<&str> = dataset.sentences().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(flat, vec!["하나", "둘", "셋", "넷", "다섯"]);
        let ch1: Vec<&str> =
            dataset.chapter(1).unwrap().sentences.iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(ch1, vec!["하나", "둘"]);
        let p2: Vec<&str> =
            dataset.pattern_group("p2").unwrap().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(p2, vec!["둘", "다섯"]);
    }

    #[test]
    fn dont_know_requeues_a_copy_six_positions_later() {
        let dataset = dataset();
        let mut tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        let len = session.len();
        let current = session.current().unwrap().kr.clone();
        assert!(session.record_response(MasteryStatus::DontKnow, &mut tracker));

        assert_eq!(session.len(), len + 1);
        let expected_index = (session.cursor() + REQUEUE_OFFSET).min(len);
        assert_eq!(session.deck()[expected_index].kr, current);
        assert_eq!(tracker.status(&current), Some(MasteryStatus::DontKnow));
    }

    #[test]
    fn requeue_clamps_to_deck_end_on_short_decks() {
        let dataset = dataset();
        let mut tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);
        session.filter_by(DeckFilter::Chapter(1), &dataset, &tracker);

        // Deck of 2, cursor 0: 0 + 6 clamps to the end.
        assert!(session.record_response(MasteryStatus::DontKnow, &mut tracker));
        assert_eq!(session.len(), 3);
        assert_eq!(session.deck()[2].kr, session.deck()[0].kr);
    }

    #[test]
    fn know_and_unsure_do_not_grow_the_deck() {
        let dataset = dataset();
        let mut tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        let len = session.len();
        session.record_response(MasteryStatus::Know, &mut tracker);
        session.record_response(MasteryStatus::Unsure, &mut tracker);
        assert_eq!(session.len(), len);
    }

    #[test]
    fn worked_example_from_chapter_one() {
        let dataset = Dataset::from_json(
            r#"{ "chapters": [ { "id": 1, "title": "A", "sentences": [
                { "kr": "s1", "en": "one" },
                { "kr": "s2", "en": "two" }
            ] } ] }"#,
        )
        .unwrap();
        let tracker = MemoryTracker::new();
        let mut session = PracticeSession::new(&dataset);

        session.set_mode(StudyMode::Chapter, &dataset);
        session.filter_by(DeckFilter::Chapter(1), &dataset, &tracker);
        let texts: Vec<&str> = session.deck().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["s1", "s2"]);

        session.next();
        assert_eq!(session.cursor(), 1);
        session.next();
        assert_eq!(session.cursor(), 0);
    }
}
