use nb_core::Article;

use crate::config::LayoutConfig;
use crate::encoding::{radius_for, Tone};

const INITIAL_RADIUS: f64 = 10.0;

/// One bubble: an article, its fixed encodings, and its simulated motion.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub index: usize,
    pub article: Article,
    pub radius: f64,
    pub tone: Tone,
    pub color: &'static str,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl LayoutNode {
    pub fn new(index: usize, article: Article, config: &LayoutConfig) -> Self {
        let radius = radius_for(&article, config.base_radius, config.min_radius);
        let tone = Tone::of(&article);
        let (cx, cy) = config.center();
        let (dx, dy) = phyllotaxis(index);
        Self {
            index,
            article,
            radius,
            tone,
            color: tone.color(),
            x: cx + dx,
            y: cy + dy,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Fresh nodes for a whole article set, in input order.
    pub fn build(articles: &[Article], config: &LayoutConfig) -> Vec<LayoutNode> {
        articles
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, article)| LayoutNode::new(i, article, config))
            .collect()
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// Sunflower-spiral offset for the i-th node, so no two nodes start coincident.
fn phyllotaxis(index: usize) -> (f64, f64) {
    let angle_step = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let radius = INITIAL_RADIUS * (0.5 + index as f64).sqrt();
    let angle = index as f64 * angle_step;
    (radius * angle.cos(), radius * angle.sin())
}
