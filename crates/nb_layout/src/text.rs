use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::LayoutConfig;

pub const ELLIPSIS: &str = "…";

/// Title lines plus source line for one bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BubbleLabel {
    pub lines: Vec<String>,
    pub source: String,
    pub truncated: bool,
}

/// Measures text in pixels from its terminal column width.
#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub glyph_width: f64,
}

impl TextMetrics {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self { glyph_width: config.glyph_width }
    }

    pub fn width(&self, text: &str) -> f64 {
        UnicodeWidthStr::width(text) as f64 * self.glyph_width
    }
}

pub fn max_lines(radius: f64, line_height: f64) -> usize {
    ((radius / line_height).floor() as usize).max(1)
}

pub fn max_text_width(radius: f64, config: &LayoutConfig) -> f64 {
    radius * config.text_width_factor
}

/// Lay out an article title inside a bubble of `radius`.
pub fn label_for(title: &str, source: &str, radius: f64, config: &LayoutConfig) -> BubbleLabel {
    let metrics = TextMetrics::from_config(config);
    let max_width = max_text_width(radius, config);
    let (lines, truncated) = wrap(title, max_width, max_lines(radius, config.line_height), &metrics);
    BubbleLabel {
        lines,
        source: source.to_string(),
        truncated,
    }
}

/// Greedy word wrap to `max_width`, cut to `max_lines` with an ellipsis on the
/// last kept line when anything was dropped.
pub fn wrap(text: &str, max_width: f64, max_lines: usize, metrics: &TextMetrics) -> (Vec<String>, bool) {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if metrics.width(&candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if metrics.width(word) <= max_width {
            current = word.to_string();
        } else {
            let mut pieces = split_word(word, max_width, metrics);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() <= max_lines {
        return (lines, false);
    }

    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        *last = with_ellipsis(last, max_width, metrics);
    }
    (lines, true)
}

/// Hard-break a word that alone is wider than the line, never inside a
/// grapheme cluster.
fn split_word(word: &str, max_width: f64, metrics: &TextMetrics) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for g in word.graphemes(true) {
        let w = metrics.width(g);
        if width + w > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push_str(g);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn with_ellipsis(line: &str, max_width: f64, metrics: &TextMetrics) -> String {
    let budget = max_width - metrics.width(ELLIPSIS);
    let mut out = String::new();
    let mut width = 0.0;
    for g in line.graphemes(true) {
        let w = metrics.width(g);
        if width + w > budget {
            break;
        }
        out.push_str(g);
        width += w;
    }
    let trimmed = out.trim_end();
    format!("{}{}", trimmed, ELLIPSIS)
}
