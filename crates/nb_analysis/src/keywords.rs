use nb_core::TopicCount;

pub const DEFAULT_KEYWORDS: usize = 5;
pub const TRENDING_TOPICS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on", "with",
    "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we", "say", "her",
    "she", "or", "an", "will", "my", "one", "all", "would", "there", "their", "what", "so", "up",
    "out", "if", "about", "who", "get", "which", "go", "me", "when", "make", "can", "like", "time",
    "no", "just", "him", "know", "take", "people", "into", "year", "your", "good", "some", "could",
    "them", "see", "other", "than", "then", "now", "look", "only", "come", "its", "over", "think",
    "also", "back", "after", "use", "two", "how", "our", "work", "first", "well", "way", "even",
    "new", "want", "because", "any", "these", "give", "day", "most", "us",
];

fn is_candidate(word: &str) -> bool {
    word.chars().count() > 3
        && word.chars().all(char::is_alphanumeric)
        && !STOP_WORDS.contains(&word.to_lowercase().as_str())
}

/// Most frequent non-stop-words (longer than three characters, purely
/// alphanumeric), lowercased. Ties keep first-seen order.
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for word in text.split_whitespace().filter(|w| is_candidate(w)) {
        let word = word.to_lowercase();
        match counts.iter_mut().find(|(w, _)| *w == word) {
            Some((_, count)) => *count += 1,
            None => counts.push((word, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(w, _)| w).collect()
}

/// Keywords across a whole result page, each with how often it appears in
/// the combined text.
pub fn trending_topics(all_text: &str, n: usize) -> Vec<TopicCount> {
    let lowered = all_text.to_lowercase();
    extract_keywords(all_text, n)
        .into_iter()
        .map(|topic| {
            let count = lowered.matches(topic.as_str()).count();
            TopicCount { topic, count }
        })
        .collect()
}
