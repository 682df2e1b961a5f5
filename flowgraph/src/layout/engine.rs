use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::rc::Weak;
use std::time::Duration;

use tracing::debug;
use tracing::warn;

use crate::config::LayoutConfig;
use crate::config::ViewConfig;
use crate::constants::TOOLTIP_OFFSET_X;
use crate::constants::TOOLTIP_OFFSET_Y;
use crate::layout::interaction::Command;
use crate::layout::interaction::EngineEvent;
use crate::layout::interaction::PointerController;
use crate::layout::interaction::PointerEvent;
use crate::layout::scene::Scene;
use crate::layout::scene::Tooltip;
use crate::layout::simulation::Simulation;
use crate::layout::style::node_style;
use crate::layout::surface::RenderSurface;
use crate::layout::view::Point;
use crate::layout::view::ScaleBounds;
use crate::layout::view::ViewTransform;
use crate::model::GraphModel;

pub type NodeClickCallback = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Initializing,
    Running,
    Settled,
}

/// Owns one graph's simulation and element set and draws it onto a caller-owned surface.
///
/// The host drives the engine by calling [`LayoutEngine::advance`] once per
/// frame. Pointer input goes through [`LayoutEngine::handle_pointer`], which
/// turns it into [`Command`]s applied between frames. Loading a new graph or
/// tearing down discards everything from the previous one.
pub struct LayoutEngine<S: RenderSurface> {
    surface: Weak<RefCell<S>>,
    layout: LayoutConfig,
    bounds: ScaleBounds,
    state: EngineState,
    model: Option<GraphModel>,
    index: HashMap<String, usize>,
    simulation: Option<Simulation>,
    scene: Option<Scene>,
    transform: ViewTransform,
    pointer: PointerController,
    tooltip: Option<Tooltip>,
    selected: Option<usize>,
    on_node_click: Option<NodeClickCallback>,
    pending: Duration,
    dirty: bool,
}

impl<S: RenderSurface> LayoutEngine<S> {
    pub fn new(
        surface: &Rc<RefCell<S>>,
        layout: LayoutConfig,
        view: ViewConfig,
    ) -> Self {
        Self {
            surface: Rc::downgrade(surface),
            layout,
            bounds: ScaleBounds {
                min: view.min_scale,
                max: view.max_scale,
            },
            state: EngineState::Idle,
            model: None,
            index: HashMap::new(),
            simulation: None,
            scene: None,
            transform: ViewTransform::IDENTITY,
            pointer: PointerController::new(view.click_distance, view.wheel_zoom_rate),
            tooltip: None,
            selected: None,
            on_node_click: None,
            pending: Duration::ZERO,
            dirty: false,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// True while the simulation still needs frames
    pub fn is_active(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn model(&self) -> Option<&GraphModel> {
        self.model.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn alpha(&self) -> Option<f64> {
        self.simulation.as_ref().map(Simulation::alpha)
    }

    pub fn position(
        &self,
        id: &str,
    ) -> Option<Point> {
        let idx = *self.index.get(id)?;
        self.simulation.as_ref()?.position(idx)
    }

    /// Current world position of every node, in graph order
    pub fn positions(&self) -> Vec<(String, Point)> {
        let Some(simulation) = &self.simulation else {
            return Vec::new();
        };
        self.scene
            .iter()
            .flat_map(|scene| scene.nodes.iter())
            .zip(simulation.nodes())
            .map(|(element, node)| (element.id.clone(), node.position()))
            .collect()
    }

    /// Replace whatever is shown with `model`.
    ///
    /// An empty model, or a surface that is gone or has no area, leaves the
    /// engine idle and draws nothing.
    pub fn load(
        &mut self,
        model: GraphModel,
        on_node_click: Option<NodeClickCallback>,
    ) {
        self.teardown();

        if model.is_empty() {
            debug!("layout::load::empty_graph::skipped");
            return;
        }
        let Some(surface) = self.surface.upgrade() else {
            warn!("layout::load::surface_dropped::skipped");
            return;
        };
        let size = surface.borrow().size();
        if size.is_empty() {
            debug!("layout::load::zero_sized_surface::{}x{}::skipped", size.width, size.height);
            return;
        }

        self.state = EngineState::Initializing;

        let links: Vec<(usize, usize)> = model.link_positions().map(|(source, target, _)| (source, target)).collect();
        let seeds = vec![None; model.node_count()];
        let center = Point::new(size.width / 2.0, size.height / 2.0);
        let simulation = Simulation::new(&seeds, &links, center, &self.layout);

        self.index = model.nodes().enumerate().map(|(idx, node)| (node.id.clone(), idx)).collect();
        let mut scene = Scene::build(&model, size);
        scene.sync_positions(simulation.nodes());
        self.scene = Some(scene);
        self.simulation = Some(simulation);
        self.model = Some(model);
        self.on_node_click = on_node_click;
        self.dirty = true;

        self.state = EngineState::Running;
        debug!(
            "layout::load::running::nodes::{}::links::{}::surface::{}x{}",
            self.index.len(),
            links.len(),
            size.width,
            size.height
        );
    }

    /// Step the engine by `dt` of host time and draw a frame if anything changed.
    ///
    /// While running, `dt` is converted into whole ticks (at least one, at most
    /// `max_ticks_per_frame`). Returns whether a frame was drawn.
    pub fn advance(
        &mut self,
        dt: Duration,
    ) -> bool {
        match self.state {
            EngineState::Idle | EngineState::Initializing => return false,
            EngineState::Settled if !self.dirty => return false,
            EngineState::Settled | EngineState::Running => {},
        }

        if self.surface.strong_count() == 0 {
            warn!("layout::advance::surface_dropped::tearing_down");
            self.teardown();
            return false;
        }

        if self.state == EngineState::Running {
            self.run_ticks(dt);
        }

        self.render()
    }

    fn run_ticks(
        &mut self,
        dt: Duration,
    ) {
        let Some(simulation) = self.simulation.as_mut() else {
            return;
        };

        let interval = self.layout.tick_interval();
        self.pending += dt;
        let due = (self.pending.as_nanos() / interval.as_nanos().max(1)) as usize;
        let ticks = due.clamp(1, self.layout.max_ticks_per_frame.max(1));
        self.pending = self.pending.saturating_sub(interval * ticks as u32);

        for _ in 0..ticks {
            simulation.tick();
            if simulation.is_cooled() {
                debug!(
                    "layout::advance::settled::alpha::{:.5}::ticks::{}",
                    simulation.alpha(),
                    simulation.ticks()
                );
                self.state = EngineState::Settled;
                self.pending = Duration::ZERO;
                break;
            }
        }

        self.dirty = true;
    }

    fn render(&mut self) -> bool {
        let Some(surface) = self.surface.upgrade() else {
            return false;
        };
        let (Some(scene), Some(simulation)) = (self.scene.as_mut(), self.simulation.as_ref()) else {
            return false;
        };

        scene.sync_positions(simulation.nodes());
        scene.transform = self.transform;
        scene.tooltip = self.tooltip.clone();
        scene.set_selected(self.selected);
        self.dirty = false;

        let mut surface = surface.borrow_mut();
        if surface.size().is_empty() {
            return false;
        }
        surface.draw(scene);
        true
    }

    /// Settle without a host scheduler, one tick interval per frame.
    /// Returns the number of frames advanced.
    pub fn run_until_settled(&mut self) -> usize {
        let interval = self.layout.tick_interval();
        let mut frames = 0;
        while self.is_active() && frames <= self.layout.max_ticks {
            self.advance(interval);
            frames += 1;
        }
        frames
    }

    pub fn apply(
        &mut self,
        command: Command,
    ) {
        if self.state == EngineState::Idle {
            debug!("layout::apply::idle::ignored::{:?}", command);
            return;
        }

        match command {
            Command::PinNode { id, position } => {
                if let (Some(&idx), Some(simulation)) = (self.index.get(&id), self.simulation.as_mut()) {
                    simulation.pin(idx, position);
                }
            },
            Command::Unpin { id } => {
                if let (Some(&idx), Some(simulation)) = (self.index.get(&id), self.simulation.as_mut()) {
                    simulation.unpin(idx);
                }
            },
            Command::InjectEnergy => {
                if let Some(simulation) = self.simulation.as_mut() {
                    simulation.set_alpha_target(self.layout.alpha_target_drag);
                }
                if self.state == EngineState::Settled {
                    debug!("layout::apply::reheated");
                    self.state = EngineState::Running;
                }
            },
            Command::ReleaseEnergy => {
                if let Some(simulation) = self.simulation.as_mut() {
                    simulation.set_alpha_target(0.0);
                }
            },
            Command::Pan { dx, dy } => self.transform.pan(dx, dy),
            Command::Zoom { anchor, factor } => self.transform.zoom_at(anchor, factor, self.bounds),
            Command::ShowTooltip { id, pointer } => {
                let Some(node) = self.model.as_ref().and_then(|model| model.node(&id)) else {
                    return;
                };
                self.tooltip = Some(Tooltip {
                    anchor: pointer.offset(TOOLTIP_OFFSET_X, TOOLTIP_OFFSET_Y),
                    title: node_style(node.group).label,
                    address: node.id.clone(),
                    value: self.model.as_ref().and_then(|model| model.total_value(&id)),
                });
            },
            Command::HideTooltip => self.tooltip = None,
        }

        self.dirty = true;
    }

    /// Feed one pointer event. Commands are applied immediately; selection
    /// events also go to the click callback. Returns the events for the caller.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
    ) -> Vec<EngineEvent> {
        if self.state == EngineState::Idle {
            return Vec::new();
        }

        let scene = self.scene.as_ref();
        let transform = self.transform;
        let outcome = self.pointer.handle(event, &transform, |screen| {
            let scene = scene?;
            let idx = scene.node_at(transform.invert(screen))?;
            Some(scene.nodes[idx].id.clone())
        });

        for command in outcome.commands {
            self.apply(command);
        }

        for event in &outcome.events {
            if let EngineEvent::NodeSelected(id) = event {
                self.selected = self.index.get(id).copied();
                self.dirty = true;
                if let Some(callback) = self.on_node_click.as_mut() {
                    callback(id);
                }
            }
        }

        outcome.events
    }

    /// Stop ticking and drop the simulation, elements, tooltip and click
    /// listener. Clears the surface if it is still alive.
    pub fn teardown(&mut self) {
        if self.state == EngineState::Idle && self.simulation.is_none() {
            return;
        }

        debug!("layout::teardown::from::{:?}", self.state);
        self.state = EngineState::Idle;
        self.simulation = None;
        self.scene = None;
        self.model = None;
        self.index.clear();
        self.tooltip = None;
        self.selected = None;
        self.on_node_click = None;
        self.transform = ViewTransform::IDENTITY;
        self.pointer.reset();
        self.pending = Duration::ZERO;
        self.dirty = false;

        if let Some(surface) = self.surface.upgrade() {
            surface.borrow_mut().clear();
        }
    }
}

impl<S: RenderSurface> Drop for LayoutEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
