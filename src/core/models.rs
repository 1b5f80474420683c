/// A study sentence, denormalized with its owning chapter so a deck entry is
/// self-contained.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub kr: String,             // Source-language text, also the mastery key
    pub rom: String,            // Romanization
    pub en: String,             // Translation
    pub pattern: String,        // Grammar pattern id, empty when untagged
    pub vocab: Vec<String>,     // Vocabulary highlighted on the card back
    pub difficulty: u8,
    pub chapter_id: u32,
    pub chapter_title: String,
    pub lesson: u32,
}

#[derive(Debug, Clone)]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    pub sentences: Vec<Sentence>,
}
