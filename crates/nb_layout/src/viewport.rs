use serde::Serialize;

use crate::config::{INITIAL_SCALE, MAX_SCALE, MIN_SCALE};

const ZOOM_OUT_FACTOR: f64 = 0.95;
const ZOOM_IN_FACTOR: f64 = 1.05;

/// Screen = world * scale + translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { x: 0.0, y: 0.0, scale: 1.0 };

    pub fn apply(&self, wx: f64, wy: f64) -> (f64, f64) {
        (wx * self.scale + self.x, wy * self.scale + self.y)
    }

    pub fn invert(&self, sx: f64, sy: f64) -> (f64, f64) {
        ((sx - self.x) / self.scale, (sy - self.y) / self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return INITIAL_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Pan/zoom state of the visible canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    transform: Transform,
    drag_origin: Option<(f64, f64)>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            transform: Transform::IDENTITY,
            drag_origin: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Put the world point `(wx, wy)` at the middle of the canvas at `scale`.
    pub fn center_on(&mut self, wx: f64, wy: f64, scale: f64) {
        let scale = clamp_scale(scale);
        self.transform = Transform {
            x: self.width / 2.0 - wx * scale,
            y: self.height / 2.0 - wy * scale,
            scale,
        };
    }

    /// Initial framing: cluster centered, zoomed out.
    pub fn frame(&mut self, wx: f64, wy: f64) {
        self.center_on(wx, wy, INITIAL_SCALE);
    }

    /// One wheel notch. Positive `delta_y` zooms out, anything else zooms in;
    /// the world point under `pointer` stays put.
    pub fn wheel(&mut self, delta_y: f64, pointer: (f64, f64)) {
        let factor = if delta_y > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        self.zoom_to(self.transform.scale * factor, pointer);
    }

    pub fn zoom_to(&mut self, scale: f64, pointer: (f64, f64)) {
        let (wx, wy) = self.transform.invert(pointer.0, pointer.1);
        let scale = clamp_scale(scale);
        self.transform = Transform {
            x: pointer.0 - wx * scale,
            y: pointer.1 - wy * scale,
            scale,
        };
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transform.x += dx;
        self.transform.y += dy;
    }

    pub fn drag_start(&mut self, sx: f64, sy: f64) {
        self.drag_origin = Some((sx, sy));
    }

    pub fn drag_move(&mut self, sx: f64, sy: f64) {
        if let Some((ox, oy)) = self.drag_origin {
            self.pan_by(sx - ox, sy - oy);
            self.drag_origin = Some((sx, sy));
        }
    }

    pub fn drag_end(&mut self) {
        self.drag_origin = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
        self.transform.invert(sx, sy)
    }
}
