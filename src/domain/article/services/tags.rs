use std::collections::HashSet;

use crate::domain::article::value_objects::{ArticleTags, MAX_TAGS};

const TITLE_MIN_LEN: usize = 4;
const CONTENT_MIN_LEN: usize = 6;
const CONTENT_SCAN_CHARS: usize = 200;

const STOP_WORDS: &[&str] = &[
    // Spanish
    "de", "el", "la", "y", "en", "con", "a", "los", "del", "entre", "por", "para", "sobre",
    "sin", "tras", "hacia", "desde", "ante", "bajo", "cabe", "según", "durante", "mediante",
    "las", "una", "unos", "unas", "que", "como", "pero", "porque", "cuando", "donde", "este",
    "esta", "estos", "estas", "también", "después", "antes",
    // English
    "the", "and", "with", "from", "that", "this", "these", "those", "into", "onto", "over",
    "under", "about", "after", "before", "their", "there", "which", "while", "were", "have",
    "been", "being", "will", "would", "should", "could", "because", "during", "without",
    "within", "between",
];

/// Derives up to five keyword tags from an article's title and the head of its content.
///
/// Tokens are split on whitespace, lowercased, stripped of anything outside the Latin
/// alphabet (plus Spanish accented vowels and ñ) and filtered by length and stop words.
/// First-encounter order decides which tokens survive the cut.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagExtractor;

impl TagExtractor {
    pub fn extract(&self, title: &str, content: &str) -> ArticleTags {
        let head: String = content.chars().take(CONTENT_SCAN_CHARS).collect();

        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(MAX_TAGS);
        for token in Self::qualifying(title, TITLE_MIN_LEN).chain(Self::qualifying(&head, CONTENT_MIN_LEN)) {
            if tags.len() == MAX_TAGS {
                break;
            }
            if seen.insert(token.clone()) {
                tags.push(token);
            }
        }

        ArticleTags::new(tags).unwrap_or_default()
    }

    fn qualifying(text: &str, min_len: usize) -> impl Iterator<Item = String> + '_ {
        text.split_whitespace()
            .map(|word| word.to_lowercase().chars().filter(|c| Self::is_tag_char(*c)).collect::<String>())
            .filter(move |word| word.chars().count() >= min_len && !STOP_WORDS.contains(&word.as_str()))
    }

    fn is_tag_char(c: char) -> bool {
        c.is_ascii_alphabetic() || "áéíóúüñÁÉÍÓÚÜÑ".contains(c)
    }
}
