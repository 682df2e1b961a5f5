use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::constants::ALPHA_START;
use crate::constants::INITIAL_RADIUS;
use crate::layout::force::CenterForce;
use crate::layout::force::Force;
use crate::layout::force::LinkForce;
use crate::layout::force::ManyBodyForce;
use crate::layout::view::Point;

/// Position and velocity of one node. While `pinned` is set the node sits at
/// the pinned point and ignores forces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub pinned: Option<Point>,
}

impl SimNode {
    pub fn at(position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            vx: 0.0,
            vy: 0.0,
            pinned: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn integrate(
        &mut self,
        friction: f64,
    ) {
        match self.pinned {
            Some(pin) => {
                self.x = pin.x;
                self.y = pin.y;
                self.vx = 0.0;
                self.vy = 0.0;
            },
            None => {
                self.vx *= friction;
                self.vy *= friction;
                self.x += self.vx;
                self.y += self.vy;
            },
        }
    }
}

/// Velocity-Verlet style force simulation with exponential cooling.
pub struct Simulation {
    nodes: Vec<SimNode>,
    forces: Vec<Box<dyn Force>>,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    friction: f64,
    ticks: usize,
    max_ticks: usize,
    rng: StdRng,
}

impl Simulation {
    /// `seeds[i]` is the starting position of node `i`; unset nodes are laid
    /// out on a phyllotaxis spiral around `center`.
    pub fn new(
        seeds: &[Option<Point>],
        links: &[(usize, usize)],
        center: Point,
        config: &LayoutConfig,
    ) -> Self {
        let golden_angle = PI * (3.0 - 5f64.sqrt());
        let nodes: Vec<SimNode> = seeds
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                let position = seed.unwrap_or_else(|| {
                    let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
                    let angle = i as f64 * golden_angle;
                    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                });
                SimNode::at(position)
            })
            .collect();

        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(links, nodes.len(), config.link_distance)),
            Box::new(ManyBodyForce::new(
                config.charge_strength,
                config.charge_distance_min,
                config.charge_distance_max,
            )),
            Box::new(CenterForce::new(center, config.center_strength)),
        ];

        debug!(
            "simulation::new::nodes::{}::links::{}::forces::{}",
            nodes.len(),
            links.len(),
            forces.iter().map(|force| force.name()).collect::<Vec<_>>().join(",")
        );

        Self {
            nodes,
            forces,
            alpha: ALPHA_START,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: 0.0,
            friction: 1.0 - config.velocity_decay,
            ticks: 0,
            max_ticks: config.max_ticks,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn position(
        &self,
        idx: usize,
    ) -> Option<Point> {
        self.nodes.get(idx).map(SimNode::position)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Ticks since the last change of energy target
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;

        for force in &self.forces {
            force.apply(&mut self.nodes, self.alpha, &mut self.rng);
        }
        for node in &mut self.nodes {
            node.integrate(self.friction);
        }

        self.ticks += 1;
    }

    /// True once energy has decayed below `alpha_min`, or the tick budget is
    /// spent while no energy is being held up by a drag.
    pub fn is_cooled(&self) -> bool {
        self.alpha < self.alpha_min || (self.alpha_target <= 0.0 && self.ticks >= self.max_ticks)
    }

    /// Change the energy target. Restarts the tick budget.
    pub fn set_alpha_target(
        &mut self,
        target: f64,
    ) {
        self.alpha_target = target;
        self.ticks = 0;
    }

    pub fn pin(
        &mut self,
        idx: usize,
        position: Point,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(idx) else {
            return false;
        };
        node.pinned = Some(position);
        node.x = position.x;
        node.y = position.y;
        node.vx = 0.0;
        node.vy = 0.0;
        true
    }

    pub fn unpin(
        &mut self,
        idx: usize,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(idx) else {
            return false;
        };
        node.pinned = None;
        true
    }
}
