use std::{
    collections::{
        BTreeMap,
        HashMap,
    },
    fs,
    path::Path,
};

use serde::Deserialize;

use super::{
    models::{
        Chapter,
        Sentence,
    },
    PracticeError,
};

fn default_difficulty() -> u8 {
    1
}

#[derive(Debug, Clone, Deserialize)]
struct RawSentence {
    #[serde(default)]
    kr: String,
    #[serde(default)]
    rom: String,
    #[serde(default)]
    en: String,
    #[serde(default)]
    pattern: String,
    #[serde(default)]
    vocab: Vec<String>,
    #[serde(default = "default_difficulty")]
    difficulty: u8,
}

#[derive(Debug, Clone, Deserialize)]
struct RawChapter {
    id: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    lesson: u32,
    #[serde(default)]
    sentences: Vec<RawSentence>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPattern {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDataset {
    #[serde(default)]
    chapters: Vec<RawChapter>,
    #[serde(default)]
    patterns: Vec<RawPattern>,
}

/// In-memory index over the sentence dataset. Built once at load, read-only
/// afterwards; sessions work on copies of these collections.
pub struct Dataset {
    sentences: Vec<Sentence>,
    chapters: BTreeMap<u32, Chapter>,
    pattern_groups: HashMap<String, Vec<Sentence>>,
    pattern_names: HashMap<String, String>,
    pattern_order: Vec<String>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, PracticeError> {
        let content = fs::read_to_string(path).map_err(|e| {
            PracticeError::FailedToLoadDataset(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, PracticeError> {
        let raw: RawDataset = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, PracticeError> {
        let mut sentences = Vec::new();
        let mut chapters = BTreeMap::new();
        let mut pattern_groups: HashMap<String, Vec<Sentence>> = HashMap::new();
        let mut seen_patterns: Vec<String> = Vec::new();

        for raw_chapter in raw.chapters {
            let chapter_sentences: Vec<Sentence> = raw_chapter
                .sentences
                .iter()
                .map(|s| Sentence {
                    kr: s.kr.clone(),
                    rom: s.rom.clone(),
                    en: s.en.clone(),
                    pattern: s.pattern.clone(),
                    vocab: s.vocab.clone(),
                    difficulty: s.difficulty,
                    chapter_id: raw_chapter.id,
                    chapter_title: raw_chapter.title.clone(),
                    lesson: raw_chapter.lesson,
                })
                .collect();

            for sentence in &chapter_sentences {
                sentences.push(sentence.clone());

                if !sentence.pattern.is_empty() {
                    if !pattern_groups.contains_key(&sentence.pattern) {
                        seen_patterns.push(sentence.pattern.clone());
                    }
                    pattern_groups.entry(sentence.pattern.clone()).or_default().push(sentence.clone());
                }
            }

            // Chapters with zero sentences are not offered as filters.
            if !chapter_sentences.is_empty() {
                chapters.insert(raw_chapter.id, Chapter {
                    id: raw_chapter.id,
                    title: raw_chapter.title,
                    sentences: chapter_sentences,
                });
            }
        }

        if sentences.is_empty() {
            return Err(PracticeError::NoSentences);
        }

        let catalog: Vec<String> = raw.patterns.iter().map(|p| p.id.clone()).collect();

        let mut pattern_names = HashMap::new();
        for pattern in raw.patterns {
            let name = if pattern.name.is_empty() { pattern.id.clone() } else { pattern.name };
            pattern_names.insert(pattern.id, name);
        }

        // Catalogued patterns keep the catalog order, uncatalogued ones follow
        // in first-seen order (stable sort).
        let mut pattern_order = seen_patterns;
        pattern_order
            .sort_by_key(|id| catalog.iter().position(|entry| entry == id).unwrap_or(usize::MAX));

        Ok(Self { sentences, chapters, pattern_groups, pattern_names, pattern_order })
    }

    /// Flat list of every sentence, in chapter order then in-chapter order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Non-empty chapters keyed (and therefore iterated) by id.
    pub fn chapters(&self) -> &BTreeMap<u32, Chapter> {
        &self.chapters
    }

    pub fn chapter(&self, id: u32) -> Option<&Chapter> {
        self.chapters.get(&id)
    }

    pub fn pattern_group(&self, id: &str) -> Option<&[Sentence]> {
        self.pattern_groups.get(id).map(Vec::as_slice)
    }

    /// Pattern ids in display order.
    pub fn pattern_ids(&self) -> &[String] {
        &self.pattern_order
    }

    /// Display name for a pattern, falling back to the id itself.
    pub fn pattern_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.pattern_names.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "chapters": [
                {
                    "id": 2,
                    "title": "Greetings",
                    "lesson": 1,
                    "sentences": [
                        { "kr": "안녕하세요", "rom": "annyeonghaseyo", "en": "Hello", "pattern": "polite-ending", "vocab": ["안녕"] },
                        { "kr": "감사합니다", "en": "Thank you", "pattern": "formal-ending" }
                    ]
                },
                { "id": 3, "title": "Empty", "sentences": [] },
                {
                    "id": 1,
                    "title": "Basics",
                    "sentences": [
                        { "kr": "네", "en": "Yes", "pattern": "polite-ending" },
                        { "kr": "아니요", "en": "No" }
                    ]
                }
            ],
            "patterns": [
                { "id": "formal-ending", "name": "Formal ending" },
                { "id": "polite-ending" }
            ]
        }"#
    }

    #[test]
    fn flat_list_keeps_load_order() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        let texts: Vec<&str> = dataset.sentences().iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["안녕하세요", "감사합니다", "네", "아니요"]);
    }

    #[test]
    fn empty_chapters_are_omitted() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        assert!(dataset.chapter(3).is_none());
        let ids: Vec<u32> = dataset.chapters().keys().copied().collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn sentences_carry_their_chapter() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        let sentence = &dataset.chapter(2).unwrap().sentences[0];
        assert_eq!(sentence.chapter_id, 2);
        assert_eq!(sentence.chapter_title, "Greetings");
        assert_eq!(sentence.lesson, 1);
    }

    #[test]
    fn pattern_groups_keep_insertion_order() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        let group = dataset.pattern_group("polite-ending").unwrap();
        let texts: Vec<&str> = group.iter().map(|s| s.kr.as_str()).collect();
        assert_eq!(texts, vec!["안녕하세요", "네"]);
        assert!(dataset.pattern_group("unknown").is_none());
    }

    #[test]
    fn untagged_sentences_join_no_pattern_group() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        let grouped: usize =
            dataset.pattern_ids().iter().map(|id| dataset.pattern_group(id).unwrap().len()).sum();
        assert_eq!(grouped, 3); // "아니요" has no pattern tag
    }

    #[test]
    fn pattern_names_fall_back_to_id() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        assert_eq!(dataset.pattern_name("formal-ending"), "Formal ending");
        assert_eq!(dataset.pattern_name("polite-ending"), "polite-ending");
        assert_eq!(dataset.pattern_name("nonexistent"), "nonexistent");
    }

    #[test]
    fn pattern_order_follows_catalog() {
        let dataset = Dataset::from_json(sample_json()).unwrap();
        assert_eq!(dataset.pattern_ids(), ["formal-ending", "polite-ending"]);
    }

    #[test]
    fn uncatalogued_patterns_sort_last() {
        let json = r#"{
            "chapters": [ { "id": 1, "sentences": [
                { "kr": "가", "en": "a", "pattern": "zz-extra" },
                { "kr": "나", "en": "b", "pattern": "listed" }
            ] } ],
            "patterns": [ { "id": "listed", "name": "Listed" } ]
        }"#;
        let dataset = Dataset::from_json(json).unwrap();
        assert_eq!(dataset.pattern_ids(), ["listed", "zz-extra"]);
    }

    #[test]
    fn optional_fields_get_defaults() {
        let json = r#"{ "chapters": [ { "id": 1, "sentences": [ { "kr": "가", "en": "a" } ] } ] }"#;
        let dataset = Dataset::from_json(json).unwrap();
        let sentence = &dataset.sentences()[0];
        assert_eq!(sentence.rom, "");
        assert_eq!(sentence.pattern, "");
        assert!(sentence.vocab.is_empty());
        assert_eq!(sentence.difficulty, 1);
        assert_eq!(sentence.lesson, 0);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        assert!(matches!(Dataset::from_json("{}"), Err(PracticeError::NoSentences)));
        let only_empty = r#"{ "chapters": [ { "id": 1, "sentences": [] } ] }"#;
        assert!(matches!(Dataset::from_json(only_empty), Err(PracticeError::NoSentences)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Dataset::from_json("not json"), Err(PracticeError::Json(_))));
    }
}
