use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use nb_core::{Result, Sentiment, SentimentModel};

use crate::round_to;
use crate::tokenize::word_tokens;

/// `(word, polarity, subjectivity)`
const LEXICON: &[(&str, f64, f64)] = &[
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("positive", 0.23, 0.54),
    ("success", 0.3, 0.3),
    ("successful", 0.75, 0.95),
    ("win", 0.8, 0.4),
    ("wins", 0.8, 0.4),
    ("gain", 0.4, 0.3),
    ("gains", 0.4, 0.3),
    ("growth", 0.3, 0.2),
    ("improve", 0.4, 0.4),
    ("improved", 0.4, 0.4),
    ("record", 0.2, 0.2),
    ("rally", 0.4, 0.3),
    ("surge", 0.3, 0.3),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("hope", 0.3, 0.5),
    ("breakthrough", 0.6, 0.5),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("strong", 0.43, 0.73),
    ("safe", 0.5, 0.5),
    ("celebrate", 0.6, 0.6),
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("negative", -0.3, 0.4),
    ("fail", -0.5, 0.3),
    ("fails", -0.5, 0.3),
    ("failure", -0.3, 0.3),
    ("loss", -0.4, 0.3),
    ("losses", -0.4, 0.3),
    ("crash", -0.6, 0.4),
    ("crisis", -0.5, 0.4),
    ("war", -0.5, 0.3),
    ("death", -0.6, 0.3),
    ("dead", -0.2, 0.4),
    ("kill", -0.6, 0.4),
    ("killed", -0.6, 0.4),
    ("attack", -0.5, 0.4),
    ("fear", -0.5, 0.6),
    ("fears", -0.5, 0.6),
    ("decline", -0.3, 0.3),
    ("drop", -0.3, 0.3),
    ("plunge", -0.5, 0.4),
    ("weak", -0.38, 0.63),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("dangerous", -0.6, 0.9),
    ("disaster", -0.8, 0.7),
    ("scandal", -0.5, 0.6),
    ("outrage", -0.6, 0.8),
    ("obviously", 0.0, 0.5),
    ("clearly", 0.1, 0.38),
    ("radical", 0.1, 0.6),
    ("extremist", -0.2, 0.6),
    ("new", 0.14, 0.45),
    ("important", 0.4, 1.0),
    ("major", 0.06, 0.5),
    ("big", 0.0, 0.1),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "isn't", "wasn't", "don't", "doesn't", "didn't", "won't", "can't", "aren't"];

/// How much a negation scales the polarity of the word it precedes.
const NEGATION_FACTOR: f64 = -0.5;

/// Word-lexicon sentiment scorer: averages the polarity and subjectivity of
/// every lexicon word in the text, flipping polarity after a negation.
pub struct LexiconSentiment {
    lexicon: HashMap<&'static str, (f64, f64)>,
}

impl fmt::Debug for LexiconSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconSentiment")
            .field("entries", &self.lexicon.len())
            .finish()
    }
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
        }
    }

    pub fn score(&self, text: &str) -> Sentiment {
        let mut polarity = 0.0;
        let mut subjectivity = 0.0;
        let mut matched = 0usize;
        let mut negate = false;

        for word in word_tokens(text) {
            if NEGATIONS.contains(&word.as_str()) || word.ends_with("n't") {
                negate = true;
                continue;
            }
            if let Some(&(p, s)) = self.lexicon.get(word.as_str()) {
                polarity += if negate { p * NEGATION_FACTOR } else { p };
                subjectivity += s;
                matched += 1;
            }
            negate = false;
        }

        if matched == 0 {
            return Sentiment::new(0.0, 0.0);
        }
        let n = matched as f64;
        Sentiment::new(
            round_to((polarity / n).clamp(-1.0, 1.0), 2),
            round_to((subjectivity / n).clamp(0.0, 1.0), 2),
        )
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentModel for LexiconSentiment {
    fn name(&self) -> &str {
        "Lexicon"
    }

    async fn analyze(&self, text: &str) -> Result<Sentiment> {
        Ok(self.score(text))
    }
}
