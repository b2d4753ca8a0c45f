use crate::language::{DetectError, LanguageDetector};

const ENGLISH: &[&str] = &[
    "the", "and", "is", "are", "was", "were", "that", "this", "with", "for", "have", "you",
    "we", "not", "of", "to", "it", "be", "on", "will",
];

const FRENCH: &[&str] = &[
    "le", "la", "les", "et", "est", "une", "des", "que", "qui", "pour", "pas", "nous", "vous",
    "avec", "dans", "sur", "du", "ce", "sont", "au",
];

const GERMAN: &[&str] = &[
    "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "wir", "sie", "mit", "für",
    "auf", "den", "dem", "zu", "auch", "sind", "ich", "es",
];

const ITALIAN: &[&str] = &[
    "il", "lo", "gli", "e", "è", "che", "di", "per", "non", "una", "sono", "con", "della",
    "del", "questo", "anche", "noi", "ma", "come", "alla",
];

/// Picks the language whose common function words occur most often.
///
/// Ties resolve in table order (en, fr, de, it).
#[derive(Debug, Clone, Copy, Default)]
pub struct StopwordDetector;

impl StopwordDetector {
    pub fn new() -> Self {
        Self
    }

    fn tables() -> [(&'static str, &'static [&'static str]); 4] {
        [
            ("en", ENGLISH),
            ("fr", FRENCH),
            ("de", GERMAN),
            ("it", ITALIAN),
        ]
    }
}

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Result<String, DetectError> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            return Err(DetectError::EmptyText);
        }

        let mut best: Option<(&str, usize)> = None;
        for (code, table) in Self::tables() {
            let hits = words.iter().filter(|w| table.contains(&w.as_str())).count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((code, hits));
            }
        }

        best.map(|(code, _)| code.to_string())
            .ok_or(DetectError::Inconclusive)
    }
}
