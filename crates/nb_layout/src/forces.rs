//! The force set acting on bubbles each tick.
//!
//! Forces mutate velocities (or, for centering, positions) in place and are
//! applied additively in a fixed order: center, charge, collide, x, y.

use crate::config::LayoutConfig;
use crate::node::LayoutNode;

/// Linear congruential generator used to nudge coincident nodes apart
/// deterministically.
#[derive(Debug, Clone)]
pub struct Jiggle {
    state: u64,
}

impl Jiggle {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 4_294_967_296;

    pub fn new(seed: u64) -> Self {
        Self { state: seed % Self::M }
    }

    fn next_unit(&mut self) -> f64 {
        self.state = (Self::A.wrapping_mul(self.state).wrapping_add(Self::C)) % Self::M;
        self.state as f64 / Self::M as f64
    }

    /// A tiny non-zero offset in `(-5e-7, 5e-7)`.
    pub fn next(&mut self) -> f64 {
        let v = (self.next_unit() - 0.5) * 1e-6;
        if v == 0.0 {
            1e-7
        } else {
            v
        }
    }
}

impl Default for Jiggle {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Translates all nodes so their mean position lands on `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterForce {
    pub x: f64,
    pub y: f64,
    pub strength: f64,
}

impl CenterForce {
    pub fn apply(&self, nodes: &mut [LayoutNode]) {
        if nodes.is_empty() {
            return;
        }
        let n = nodes.len() as f64;
        let (sx, sy) = nodes.iter().fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
        let dx = (sx / n - self.x) * self.strength;
        let dy = (sy / n - self.y) * self.strength;
        for node in nodes.iter_mut() {
            node.x -= dx;
            node.y -= dy;
        }
    }
}

/// Pairwise inverse-distance repulsion (negative strength) between all nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ManyBodyForce {
    pub strength: f64,
    /// Squared distance below which the force stops growing.
    pub distance_min2: f64,
}

impl ManyBodyForce {
    pub fn apply(&self, nodes: &mut [LayoutNode], alpha: f64, jiggle: &mut Jiggle) {
        let count = nodes.len();
        let mut dv = vec![(0.0, 0.0); count];
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let mut dx = nodes[j].x - nodes[i].x;
                let mut dy = nodes[j].y - nodes[i].y;
                let mut l = dx * dx + dy * dy;
                if dx == 0.0 {
                    dx = jiggle.next();
                    l += dx * dx;
                }
                if dy == 0.0 {
                    dy = jiggle.next();
                    l += dy * dy;
                }
                if l < self.distance_min2 {
                    l = (self.distance_min2 * l).sqrt();
                }
                let w = self.strength * alpha / l;
                dv[i].0 += dx * w;
                dv[i].1 += dy * w;
            }
        }
        for (node, (dvx, dvy)) in nodes.iter_mut().zip(dv) {
            node.vx += dvx;
            node.vy += dvy;
        }
    }
}

/// Pushes apart any two circles (radius + padding) that would overlap after
/// this tick's velocity is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CollideForce {
    pub padding: f64,
    pub strength: f64,
    pub iterations: usize,
}

impl CollideForce {
    pub fn apply(&self, nodes: &mut [LayoutNode], jiggle: &mut Jiggle) {
        let count = nodes.len();
        for _ in 0..self.iterations {
            for i in 0..count {
                let ri = nodes[i].radius + self.padding;
                let ri2 = ri * ri;
                for j in (i + 1)..count {
                    let rj = nodes[j].radius + self.padding;
                    let r = ri + rj;
                    let mut x = nodes[i].x + nodes[i].vx - nodes[j].x - nodes[j].vx;
                    let mut y = nodes[i].y + nodes[i].vy - nodes[j].y - nodes[j].vy;
                    let mut l = x * x + y * y;
                    if l >= r * r {
                        continue;
                    }
                    if x == 0.0 {
                        x = jiggle.next();
                        l += x * x;
                    }
                    if y == 0.0 {
                        y = jiggle.next();
                        l += y * y;
                    }
                    let dist = l.sqrt();
                    let push = (r - dist) / dist * self.strength;
                    x *= push;
                    y *= push;
                    let rj2 = rj * rj;
                    let share = rj2 / (ri2 + rj2);
                    nodes[i].vx += x * share;
                    nodes[i].vy += y * share;
                    nodes[j].vx -= x * (1.0 - share);
                    nodes[j].vy -= y * (1.0 - share);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Weak spring toward a target coordinate on a single axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionForce {
    pub axis: Axis,
    pub target: f64,
    pub strength: f64,
}

impl PositionForce {
    pub fn apply(&self, nodes: &mut [LayoutNode], alpha: f64) {
        let k = self.strength * alpha;
        for node in nodes.iter_mut() {
            match self.axis {
                Axis::X => node.vx += (self.target - node.x) * k,
                Axis::Y => node.vy += (self.target - node.y) * k,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Forces {
    pub center: CenterForce,
    pub charge: ManyBodyForce,
    pub collide: CollideForce,
    pub x: PositionForce,
    pub y: PositionForce,
    pub jiggle: Jiggle,
}

impl Forces {
    pub fn from_config(config: &LayoutConfig) -> Self {
        let (cx, cy) = config.center();
        Self {
            center: CenterForce { x: cx, y: cy, strength: 1.0 },
            charge: ManyBodyForce {
                strength: config.charge_strength,
                distance_min2: 1.0,
            },
            collide: CollideForce {
                padding: config.collision_padding,
                strength: 1.0,
                iterations: 1,
            },
            x: PositionForce { axis: Axis::X, target: cx, strength: config.axis_strength },
            y: PositionForce { axis: Axis::Y, target: cy, strength: config.axis_strength },
            jiggle: Jiggle::default(),
        }
    }

    /// Point every centering force at a new canvas center.
    pub fn recenter(&mut self, cx: f64, cy: f64) {
        self.center.x = cx;
        self.center.y = cy;
        self.x.target = cx;
        self.y.target = cy;
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center.x, self.center.y)
    }

    pub fn apply(&mut self, nodes: &mut [LayoutNode], alpha: f64) {
        self.center.apply(nodes);
        self.charge.apply(nodes, alpha, &mut self.jiggle);
        self.collide.apply(nodes, &mut self.jiggle);
        self.x.apply(nodes, alpha);
        self.y.apply(nodes, alpha);
    }
}
