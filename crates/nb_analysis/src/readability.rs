use nb_core::Readability;

use crate::round_to;
use crate::tokenize::{sentences, syllables};

fn standard() -> Readability {
    Readability {
        score: 60.0,
        reading_level: "standard".to_string(),
        avg_sentence_length: 20.0,
    }
}

pub fn reading_level(score: f64) -> &'static str {
    if score > 80.0 {
        "easy"
    } else if score > 60.0 {
        "standard"
    } else {
        "advanced"
    }
}

/// Flesch reading ease, clamped to `[0, 100]`. Text too short to measure
/// scores as "standard".
pub fn readability(text: &str) -> Readability {
    if text.trim().chars().count() < 10 {
        return standard();
    }
    let sentence_count = sentences(text).len();
    let words: Vec<&str> = text.split_whitespace().collect();
    if sentence_count == 0 || words.is_empty() {
        return standard();
    }

    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / words.len() as f64;
    let flesch = (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0);

    Readability {
        score: round_to(flesch, 1),
        reading_level: reading_level(flesch).to_string(),
        avg_sentence_length: round_to(words_per_sentence, 1),
    }
}
