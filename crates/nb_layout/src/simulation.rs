use tracing::debug;

use crate::config::LayoutConfig;
use crate::forces::Forces;
use crate::node::LayoutNode;

/// Advance every node by one discrete step at the given `alpha`.
///
/// Forces accumulate into velocities, velocities are damped by
/// `velocity_decay`, and positions integrate the damped velocities.
pub fn step(nodes: &mut [LayoutNode], forces: &mut Forces, alpha: f64, velocity_decay: f64) {
    forces.apply(nodes, alpha);
    for node in nodes.iter_mut() {
        node.vx *= 1.0 - velocity_decay;
        node.vy *= 1.0 - velocity_decay;
        node.x += node.vx;
        node.y += node.vy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Running,
    /// Alpha fell below the minimum; ticking is a no-op until restarted.
    Converged,
    /// Explicitly halted; ticking is a no-op until restarted.
    Stopped,
}

/// Owns one layout pass: the node array, the force set and the cooling schedule.
#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<LayoutNode>,
    forces: Forces,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    velocity_decay: f64,
    ticks: u64,
    state: SimulationState,
}

impl Simulation {
    pub fn new(nodes: Vec<LayoutNode>, config: &LayoutConfig) -> Self {
        Self {
            nodes,
            forces: Forces::from_config(config),
            alpha: 1.0,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: 0.0,
            velocity_decay: config.velocity_decay,
            ticks: 0,
            state: SimulationState::Running,
        }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn forces(&self) -> &Forces {
        &self.forces
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Run one tick. Returns `false` without touching any node when the
    /// simulation is stopped or has converged.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        step(&mut self.nodes, &mut self.forces, self.alpha, self.velocity_decay);
        self.ticks += 1;
        if self.alpha < self.alpha_min {
            debug!("Simulation converged after {} ticks", self.ticks);
            self.state = SimulationState::Converged;
        }
        true
    }

    /// Tick until convergence, a stop, or `max_ticks`. Returns the ticks run.
    pub fn run(&mut self, max_ticks: usize) -> usize {
        let mut ran = 0;
        while ran < max_ticks && self.tick() {
            ran += 1;
        }
        ran
    }

    /// Halt ticking. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.state == SimulationState::Running {
            debug!("Simulation stopped after {} ticks", self.ticks);
        }
        self.state = SimulationState::Stopped;
    }

    /// Reheat to full alpha and resume ticking.
    pub fn restart(&mut self) {
        self.alpha = 1.0;
        self.state = SimulationState::Running;
    }

    /// Point the centering forces at `(cx, cy)` and restart.
    pub fn recenter(&mut self, cx: f64, cy: f64) {
        self.forces.recenter(cx, cy);
        self.restart();
    }

    /// Axis-aligned bounds of all bubbles as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.nodes.iter().fold(None, |acc, n| {
            let (x0, y0, x1, y1) = (n.x - n.radius, n.y - n.radius, n.x + n.radius, n.y + n.radius);
            Some(match acc {
                None => (x0, y0, x1, y1),
                Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
            })
        })
    }

    /// Mean node position.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.nodes.is_empty() {
            return None;
        }
        let n = self.nodes.len() as f64;
        let (sx, sy) = self.nodes.iter().fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
        Some((sx / n, sy / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::Article;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article::new(format!("Story {}", i), format!("https://example.com/{}", i), "Example"))
            .collect()
    }

    fn simulation(n: usize) -> Simulation {
        let config = LayoutConfig::default();
        Simulation::new(LayoutNode::build(&articles(n), &config), &config)
    }

    #[test]
    fn test_empty_simulation_ticks_safely() {
        let mut sim = simulation(0);
        assert_eq!(sim.run(10), 10);
        assert!(sim.nodes().is_empty());
        assert_eq!(sim.bounds(), None);
        assert_eq!(sim.centroid(), None);
    }

    #[test]
    fn test_converges_within_default_schedule() {
        let mut sim = simulation(3);
        let ran = sim.run(10_000);
        assert!(ran < 400, "ran {} ticks", ran);
        assert_eq!(sim.state(), SimulationState::Converged);
        assert!(!sim.tick());
    }

    #[test]
    fn test_settled_bubbles_do_not_overlap() {
        let mut sim = simulation(12);
        sim.run(1_000);
        let nodes = sim.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let dist = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                // Allow a little slack for the final soft collision step.
                assert!(dist > (a.radius + b.radius) * 0.9, "{} vs {}", dist, a.radius + b.radius);
            }
        }
    }

    #[test]
    fn test_cluster_stays_near_center() {
        let mut sim = simulation(8);
        sim.run(1_000);
        let (cx, cy) = sim.centroid().unwrap();
        assert!((cx - 600.0).abs() < 1.0);
        assert!((cy - 400.0).abs() < 1.0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut sim = simulation(4);
        sim.tick();
        let before: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
        sim.stop();
        sim.stop();
        assert_eq!(sim.state(), SimulationState::Stopped);
        assert!(!sim.tick());
        let after: Vec<(f64, f64)> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_recenter_restarts_and_moves_cluster() {
        let mut sim = simulation(6);
        sim.run(1_000);
        assert!(!sim.is_running());

        sim.recenter(200.0, 150.0);
        assert!(sim.is_running());
        assert_eq!(sim.alpha(), 1.0);
        assert_eq!(sim.forces().center(), (200.0, 150.0));

        sim.run(1_000);
        let (cx, cy) = sim.centroid().unwrap();
        assert!((cx - 200.0).abs() < 1.0);
        assert!((cy - 150.0).abs() < 1.0);
    }
}
