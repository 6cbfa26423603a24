//! Force-directed "bubble universe" layout for annotated news articles.
//!
//! Each article becomes a circle whose radius encodes bias and readability and
//! whose fill encodes sentiment. A d3-style force simulation positions the
//! circles; [`BubbleUniverse`] wraps it with pan/zoom, hit testing and
//! resize handling, and [`Scene`] is what a renderer draws.

pub mod config;
pub mod encoding;
pub mod forces;
pub mod node;
pub mod scene;
pub mod simulation;
pub mod text;
pub mod universe;
pub mod viewport;

pub use config::{LayoutConfig, Palette, BASE_RADIUS, MAX_SCALE, MIN_RADIUS, MIN_SCALE};
pub use encoding::{color_for, radius_for, Tone};
pub use forces::Forces;
pub use node::LayoutNode;
pub use scene::{BubbleShape, Scene};
pub use simulation::{step, Simulation, SimulationState};
pub use universe::{render_scene, BubbleUniverse};
pub use viewport::{Transform, Viewport};

pub mod prelude {
    pub use super::{render_scene, BubbleUniverse, LayoutConfig, Scene};
    pub use nb_core::Article;
}
