use std::collections::BTreeMap;

use nb_core::BiasAnalysis;

use crate::round_to;

/// Indicator categories and the words that count toward each. A word listed
/// in two categories counts in both.
pub const BIAS_INDICATORS: &[(&str, &[&str])] = &[
    ("emotional", &["must", "never", "always", "clearly", "obviously"]),
    ("loaded_words", &["radical", "extremist", "fanatic", "fundamental"]),
    ("generalizations", &["all", "every", "none", "never", "always"]),
];

/// Weight of subjectivity in the total bias score.
const SUBJECTIVITY_WEIGHT: f64 = 5.0;

pub fn bias_level(score: f64) -> &'static str {
    if score > 10.0 {
        "high"
    } else if score > 5.0 {
        "medium"
    } else {
        "low"
    }
}

/// Count bias indicator words (whitespace tokens, case-insensitive) and fold
/// in the text's subjectivity.
pub fn detect_bias(text: &str, subjectivity: f64) -> BiasAnalysis {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let bias_factors: BTreeMap<String, u32> = BIAS_INDICATORS
        .iter()
        .map(|(category, indicators)| {
            let count = words.iter().filter(|w| indicators.contains(w)).count() as u32;
            (category.to_string(), count)
        })
        .collect();

    let total = bias_factors.values().sum::<u32>() as f64 + subjectivity * SUBJECTIVITY_WEIGHT;
    BiasAnalysis {
        bias_score: round_to(total, 1),
        bias_level: bias_level(total).to_string(),
        bias_factors,
    }
}

/// Result used when the text could not be scored at all.
pub fn unknown_bias() -> BiasAnalysis {
    BiasAnalysis {
        bias_score: 0.0,
        bias_level: "unknown".to_string(),
        bias_factors: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_indicators() {
        let bias = detect_bias("We must never allow radical ideas. All of them, always", 0.0);
        assert_eq!(bias.bias_factors["emotional"], 3);
        assert_eq!(bias.bias_factors["loaded_words"], 1);
        assert_eq!(bias.bias_factors["generalizations"], 3);
        assert_eq!(bias.bias_score, 7.0);
        assert_eq!(bias.bias_level, "medium");
    }

    #[test]
    fn test_subjectivity_contributes() {
        let bias = detect_bias("Rates were unchanged", 0.8);
        assert_eq!(bias.bias_score, 4.0);
        let bias = detect_bias("You must always obviously clearly act", 0.5);
        assert_eq!(bias.bias_score, 7.5);
        assert_eq!(bias.bias_level, "medium");
    }

    #[test]
    fn test_high_level() {
        let text = "always never must all every none always never";
        let bias = detect_bias(text, 1.0);
        assert!(bias.bias_score > 10.0);
        assert_eq!(bias.bias_level, "high");
    }
}
