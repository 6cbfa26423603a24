use serde::{Deserialize, Serialize};

/// Radius of a bubble whose article has no bias penalty and a perfect readability score.
pub const BASE_RADIUS: f64 = 60.0;

/// Smallest radius a bubble is ever drawn with.
pub const MIN_RADIUS: f64 = 8.0;

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 4.0;
pub const INITIAL_SCALE: f64 = 0.6;

/// Tunables for the bubble universe. `Default` gives the values the UI ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    pub base_radius: f64,
    pub min_radius: f64,
    /// Extra space kept between colliding bubbles.
    pub collision_padding: f64,
    pub charge_strength: f64,
    pub axis_strength: f64,
    pub velocity_decay: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub line_height: f64,
    pub font_size: f64,
    /// Horizontal advance of one terminal column of title text, in pixels.
    pub glyph_width: f64,
    /// Wrapped title width as a multiple of the bubble radius.
    pub text_width_factor: f64,
    pub dark_mode: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            width: 1200.0,
            height: 800.0,
            base_radius: BASE_RADIUS,
            min_radius: MIN_RADIUS,
            collision_padding: 2.0,
            charge_strength: -50.0,
            axis_strength: 0.1,
            velocity_decay: 0.4,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            line_height: 12.0,
            font_size: 10.0,
            glyph_width: 5.5,
            text_width_factor: 1.6,
            dark_mode: false,
        }
    }
}

impl LayoutConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Colors that depend on the light/dark display mode. Fill colors never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub secondary_text: &'static str,
    pub stroke: &'static str,
    pub background: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        text: "#1f2937",
        secondary_text: "#4b5563",
        stroke: "#ffffff",
        background: "#f9fafb",
    };

    pub const DARK: Palette = Palette {
        text: "#f9fafb",
        secondary_text: "#d1d5db",
        stroke: "#111827",
        background: "#111827",
    };

    pub fn for_mode(dark_mode: bool) -> Palette {
        if dark_mode {
            Palette::DARK
        } else {
            Palette::LIGHT
        }
    }
}
