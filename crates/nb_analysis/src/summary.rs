use crate::tokenize::sentences;

pub const SUMMARY_SENTENCES: usize = 3;
pub const MAX_QUOTES: usize = 2;

const QUOTE_MARKS: &[char] = &['"', '“', '”'];

/// Extractive summary: earlier sentences and sentences of 10–25 words score
/// higher; the best `max_sentences` are joined in their original order.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let sentences = sentences(text);
    if sentences.len() <= max_sentences {
        return text.to_string();
    }

    let mut scored: Vec<(f64, usize)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let mut score = 1.0 / (i as f64 + 1.0);
            let length = sentence.split_whitespace().count();
            if (10..=25).contains(&length) {
                score += 0.3;
            }
            (score, i)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let mut picked: Vec<usize> = scored.into_iter().take(max_sentences).map(|(_, i)| i).collect();
    picked.sort_unstable();

    picked
        .into_iter()
        .map(|i| sentences[i].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Up to `max_quotes` sentences that carry a quotation mark.
pub fn key_quotes(text: &str, max_quotes: usize) -> Vec<String> {
    sentences(text)
        .into_iter()
        .filter(|s| s.contains(QUOTE_MARKS))
        .take(max_quotes)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_returned_whole() {
        let text = "One. Two. Three.";
        assert_eq!(summarize(text, 3), text);
    }

    #[test]
    fn test_prefers_early_and_medium_sentences() {
        let medium = "This sentence has exactly ten words in it for sure.";
        let text = format!("Lead. Second. Third. Fourth. {}", medium);
        let summary = summarize(&text, 3);
        // 1/5 + 0.3 ties with 1/2 and beats 1/3; original order restored.
        assert_eq!(summary, format!("Lead. Second. {}", medium));
    }

    #[test]
    fn test_key_quotes() {
        let text = "The minister spoke. \"We will act,\" she said. Critics replied “too late.” Nothing else.";
        let quotes = key_quotes(text, 2);
        assert_eq!(quotes.len(), 2);
        assert!(quotes[0].starts_with("\"We will act,\""));
        assert!(quotes[1].contains("“too late.”"));
        assert!(key_quotes("No quotes here.", 2).is_empty());
    }
}
