//! Explicit scene model sampled from the simulation, and its SVG rendering.

use std::fmt::Write;

use serde::Serialize;

use crate::config::{LayoutConfig, Palette};
use crate::encoding::Tone;
use crate::node::LayoutNode;
use crate::text::{label_for, BubbleLabel};
use crate::viewport::Transform;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleShape {
    pub index: usize,
    pub url: String,
    pub title: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub tone: Tone,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub label: BubbleLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub dark_mode: bool,
    pub transform: Transform,
    pub bubbles: Vec<BubbleShape>,
    #[serde(skip)]
    palette: Palette,
    #[serde(skip)]
    line_height: f64,
    #[serde(skip)]
    font_size: f64,
}

impl Scene {
    /// Rebuild every shape from the current node positions.
    pub fn build(nodes: &[LayoutNode], transform: Transform, config: &LayoutConfig) -> Scene {
        let palette = Palette::for_mode(config.dark_mode);
        let bubbles = nodes
            .iter()
            .map(|node| BubbleShape {
                index: node.index,
                url: node.article.url.clone(),
                title: node.article.title.clone(),
                cx: node.x,
                cy: node.y,
                r: node.radius,
                tone: node.tone,
                fill: node.color,
                stroke: palette.stroke,
                label: label_for(&node.article.title, &node.article.source, node.radius, config),
            })
            .collect();
        Scene {
            width: config.width,
            height: config.height,
            dark_mode: config.dark_mode,
            transform,
            bubbles,
            palette,
            line_height: config.line_height,
            font_size: config.font_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(self.width),
            h = fmt_num(self.height),
        );
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.palette.background
        );
        if self.bubbles.is_empty() {
            svg.push_str("</svg>\n");
            return svg;
        }
        let _ = writeln!(
            svg,
            r#"<g transform="translate({},{}) scale({})">"#,
            fmt_num(self.transform.x),
            fmt_num(self.transform.y),
            fmt_num(self.transform.scale),
        );
        for bubble in &self.bubbles {
            self.write_bubble(&mut svg, bubble);
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }

    fn write_bubble(&self, svg: &mut String, bubble: &BubbleShape) {
        let _ = writeln!(
            svg,
            r#"<g class="bubble {tone}" data-index="{index}"><a href="{url}"><title>{title}</title>"#,
            tone = tone_class(bubble.tone),
            index = bubble.index,
            url = escape(&bubble.url),
            title = escape(&bubble.title),
        );
        let _ = writeln!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="0.85" stroke="{}" stroke-width="2"/>"#,
            fmt_num(bubble.cx),
            fmt_num(bubble.cy),
            fmt_num(bubble.r),
            bubble.fill,
            bubble.stroke,
        );

        let total = bubble.label.lines.len() + 1;
        let first_y = bubble.cy - (total as f64 - 1.0) * self.line_height / 2.0 + self.font_size / 3.0;
        for (i, line) in bubble.label.lines.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="{}" fill="{}">{}</text>"#,
                fmt_num(bubble.cx),
                fmt_num(first_y + i as f64 * self.line_height),
                fmt_num(self.font_size),
                self.palette.text,
                escape(line),
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="{}" font-style="italic" fill="{}">{}</text>"#,
            fmt_num(bubble.cx),
            fmt_num(first_y + bubble.label.lines.len() as f64 * self.line_height),
            fmt_num(self.font_size * 0.8),
            self.palette.secondary_text,
            escape(&bubble.label.source),
        );
        svg.push_str("</a></g>\n");
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "positive",
        Tone::Negative => "negative",
        Tone::Neutral => "neutral",
        Tone::Unknown => "unknown",
    }
}

fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::{Article, Sentiment};

    #[test]
    fn test_empty_scene_renders_bare_canvas() {
        let scene = Scene::build(&[], Transform::IDENTITY, &LayoutConfig::default());
        assert!(scene.is_empty());
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_bubble_markup_is_escaped() {
        let config = LayoutConfig::default();
        let mut article = Article::new("Q&A: <Rates> \"up\"", "https://example.com/?a=1&b=2", "Wire");
        article.sentiment = Some(Sentiment::new(0.6, 0.1));
        let nodes = vec![LayoutNode::new(0, article, &config)];
        let svg = Scene::build(&nodes, Transform::IDENTITY, &config).to_svg();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Q&amp;A: &lt;Rates&gt; &quot;up&quot;"));
        assert!(svg.contains("?a=1&amp;b=2"));
        assert!(svg.contains("bubble positive"));
        assert!(svg.contains(">Wire</text>"));
    }

    #[test]
    fn test_dark_mode_changes_only_text_and_stroke() {
        let light = LayoutConfig::default();
        let dark = LayoutConfig::default().with_dark_mode(true);
        let article = Article::new("Title", "https://example.com", "Wire");
        let light_scene = Scene::build(&[LayoutNode::new(0, article.clone(), &light)], Transform::IDENTITY, &light);
        let dark_scene = Scene::build(&[LayoutNode::new(0, article, &dark)], Transform::IDENTITY, &dark);
        let (l, d) = (&light_scene.bubbles[0], &dark_scene.bubbles[0]);
        assert_eq!(l.fill, d.fill);
        assert_eq!((l.cx, l.cy, l.r), (d.cx, d.cy, d.r));
        assert_ne!(l.stroke, d.stroke);
        assert!(dark_scene.to_svg().contains(Palette::DARK.text));
    }

    #[test]
    fn test_scene_json_shape() {
        let config = LayoutConfig::default();
        let mut article = Article::new("Rates hold", "https://example.com/rates", "Wire");
        article.sentiment = Some(Sentiment::new(-0.5, 0.4));
        let nodes = vec![LayoutNode::new(0, article, &config)];
        let transform = Transform { x: 10.0, y: 20.0, scale: 0.6 };
        let value = serde_json::to_value(Scene::build(&nodes, transform, &config)).unwrap();

        assert_eq!(value["width"], 1200.0);
        assert_eq!(value["dark_mode"], false);
        assert_eq!(value["transform"]["scale"], 0.6);
        let bubble = &value["bubbles"][0];
        assert_eq!(bubble["tone"], "negative");
        assert_eq!(bubble["fill"], "#f87171");
        assert_eq!(bubble["url"], "https://example.com/rates");
        assert_eq!(bubble["label"]["source"], "Wire");
        assert!(value.get("palette").is_none());
        assert!(value.get("line_height").is_none());
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(0.6), "0.6");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(12.346), "12.35");
        assert_eq!(fmt_num(10.0), "10");
    }
}
