use std::fmt;

use nb_core::Article;
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::node::LayoutNode;
use crate::scene::Scene;
use crate::simulation::Simulation;
use crate::viewport::Viewport;

pub type SelectHandler = Box<dyn FnMut(&Article) + Send>;
pub type CloseHandler = Box<dyn FnOnce() + Send>;

/// The bubble universe as its host sees it: feed articles in, pump ticks,
/// forward pointer and resize input, sample a [`Scene`].
///
/// Nothing persists across article sets; every call to
/// [`set_articles`](Self::set_articles) discards the previous layout.
pub struct BubbleUniverse {
    config: LayoutConfig,
    simulation: Simulation,
    viewport: Viewport,
    on_select: Option<SelectHandler>,
    on_close: Option<CloseHandler>,
    listening: bool,
    closed: bool,
}

impl fmt::Debug for BubbleUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BubbleUniverse")
            .field("config", &self.config)
            .field("nodes", &self.simulation.nodes().len())
            .field("state", &self.simulation.state())
            .field("viewport", &self.viewport)
            .field("listening", &self.listening)
            .field("closed", &self.closed)
            .finish()
    }
}

impl BubbleUniverse {
    pub fn new(config: LayoutConfig) -> Self {
        let simulation = Simulation::new(Vec::new(), &config);
        let viewport = Viewport::new(config.width, config.height);
        Self {
            config,
            simulation,
            viewport,
            on_select: None,
            on_close: None,
            listening: true,
            closed: false,
        }
    }

    pub fn with_articles(config: LayoutConfig, articles: &[Article]) -> Self {
        let mut universe = Self::new(config);
        universe.set_articles(articles);
        universe
    }

    pub fn on_select(&mut self, handler: impl FnMut(&Article) + Send + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    pub fn on_close(&mut self, handler: impl FnOnce() + Send + 'static) {
        self.on_close = Some(Box::new(handler));
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        self.simulation.nodes()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replace the whole article set: the old simulation is halted and a new
    /// one built from scratch, framed at the initial zoom.
    pub fn set_articles(&mut self, articles: &[Article]) {
        if self.closed {
            return;
        }
        self.simulation.stop();
        let nodes = LayoutNode::build(articles, &self.config);
        info!("🫧 Laying out {} articles", nodes.len());
        self.simulation = Simulation::new(nodes, &self.config);
        let (cx, cy) = self.config.center();
        self.viewport.frame(cx, cy);
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.config.dark_mode = dark_mode;
    }

    /// One animation frame's worth of simulation.
    pub fn tick(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.simulation.tick()
    }

    /// Run until the layout settles or `max_ticks` is reached, then re-frame
    /// the view on the cluster.
    pub fn settle(&mut self, max_ticks: usize) -> usize {
        if self.closed {
            return 0;
        }
        let ran = self.simulation.run(max_ticks);
        if let Some((cx, cy)) = self.simulation.centroid() {
            self.viewport.frame(cx, cy);
        }
        debug!("Settled after {} ticks", ran);
        ran
    }

    pub fn scene(&self) -> Scene {
        Scene::build(self.simulation.nodes(), self.viewport.transform(), &self.config)
    }

    /// Article under the screen point, topmost bubble first.
    pub fn hit_test(&self, sx: f64, sy: f64) -> Option<&LayoutNode> {
        let (wx, wy) = self.viewport.to_world(sx, sy);
        self.simulation.nodes().iter().rev().find(|n| n.contains(wx, wy))
    }

    /// Report the clicked article to the selection handler. Layout and view
    /// are left untouched.
    pub fn click(&mut self, sx: f64, sy: f64) -> Option<Article> {
        if self.closed {
            return None;
        }
        let article = self.hit_test(sx, sy).map(|n| n.article.clone())?;
        debug!("Selected {}", article.url);
        if let Some(handler) = self.on_select.as_mut() {
            handler(&article);
        }
        Some(article)
    }

    pub fn wheel(&mut self, delta_y: f64, pointer: (f64, f64)) {
        if !self.closed {
            self.viewport.wheel(delta_y, pointer);
        }
    }

    pub fn drag_start(&mut self, sx: f64, sy: f64) {
        if !self.closed {
            self.viewport.drag_start(sx, sy);
        }
    }

    pub fn drag_move(&mut self, sx: f64, sy: f64) {
        if !self.closed {
            self.viewport.drag_move(sx, sy);
        }
    }

    pub fn drag_end(&mut self) {
        self.viewport.drag_end();
    }

    /// Window resize: new canvas, new center target, simulation reheated.
    /// Returns `false` once the resize listener has been detached.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !self.listening {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.viewport.resize(width, height);
        let (cx, cy) = self.config.center();
        let scale = self.viewport.scale();
        self.viewport.center_on(cx, cy, scale);
        self.simulation.recenter(cx, cy);
        debug!("Resized to {}x{}, recentering on ({}, {})", width, height, cx, cy);
        true
    }

    /// Halt ticking without tearing down. Idempotent.
    pub fn stop(&mut self) {
        self.simulation.stop();
    }

    /// User dismissed the view: notify the host once, then tear down.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Some(handler) = self.on_close.take() {
            handler();
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        self.simulation.stop();
        self.listening = false;
        self.on_select = None;
        self.on_close = None;
        self.closed = true;
    }
}

impl Drop for BubbleUniverse {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Lay out and settle an article set in one go.
pub fn render_scene(articles: &[Article], config: LayoutConfig, max_ticks: usize) -> Scene {
    let mut universe = BubbleUniverse::with_articles(config, articles);
    universe.settle(max_ticks);
    universe.scene()
}
