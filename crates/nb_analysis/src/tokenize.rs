use unicode_segmentation::UnicodeSegmentation;

/// UAX#29 sentences, trimmed. Closing quotes stay with their sentence and an
/// abbreviation before a lowercase word does not end one (`the U.S. said`).
pub fn sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercased UAX#29 words, for lexicon lookups. Curly apostrophes are
/// folded so `isn’t` and `isn't` look the same.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.replace('’', "'").to_lowercase())
        .collect()
}

/// Vowel-group syllable estimate, at least one per word.
pub fn syllables(word: &str) -> usize {
    let word: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if word.is_empty() {
        return 1;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    if count > 1 && word.ends_with('e') && !word.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences() {
        let s = sentences("Stocks rose. Prices fell! What next?");
        assert_eq!(s, vec!["Stocks rose.", "Prices fell!", "What next?"]);
    }

    #[test]
    fn test_sentences_keep_quotes_and_abbreviations() {
        let s = sentences("\"It's huge.\" Officials agreed. Talks with the U.S. resumed today.");
        assert_eq!(s, vec!["\"It's huge.\"", "Officials agreed.", "Talks with the U.S. resumed today."]);
    }

    #[test]
    fn test_sentences_keep_decimals_and_trailing_text() {
        let s = sentences("Growth hit 3.5 percent. No end mark");
        assert_eq!(s, vec!["Growth hit 3.5 percent.", "No end mark"]);
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_word_tokens() {
        assert_eq!(word_tokens("Isn't it GREAT, 'folks'?"), vec!["isn't", "it", "great", "folks"]);
        assert_eq!(word_tokens("It isn’t"), vec!["it", "isn't"]);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("table"), 2);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("economy"), 4);
        assert_eq!(syllables("42"), 1);
    }
}
