//! Forces acting on the layout simulation.
//!
//! Forces only write velocities (the centre force also shifts positions);
//! integration happens in [`crate::layout::simulation::Simulation::tick`].
//! Pinned nodes still push and pull on their neighbours, their own movement is
//! overridden during integration.

use rand::Rng;
use rand::rngs::StdRng;

use crate::constants::JIGGLE_SCALE;
use crate::layout::simulation::SimNode;
use crate::layout::view::Point;

pub trait Force {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        nodes: &mut [SimNode],
        alpha: f64,
        rng: &mut StdRng,
    );
}

/// Tiny random offset used to separate coincident nodes
pub fn jiggle(rng: &mut StdRng) -> f64 {
    (rng.random::<f64>() - 0.5) * JIGGLE_SCALE
}

#[derive(Debug, Clone, PartialEq)]
struct Spring {
    source: usize,
    target: usize,
    strength: f64,
    // Share of the correction applied to the target
    bias: f64,
}

/// Springs pulling linked nodes toward a rest distance.
///
/// Stiffness is `1 / min(degree(source), degree(target))` so hubs are not
/// dragged around by every leaf; the correction is split between the two ends
/// in proportion to their degrees.
#[derive(Debug, Clone)]
pub struct LinkForce {
    springs: Vec<Spring>,
    distance: f64,
}

impl LinkForce {
    pub fn new(
        links: &[(usize, usize)],
        node_count: usize,
        distance: f64,
    ) -> Self {
        let links: Vec<(usize, usize)> = links
            .iter()
            .copied()
            .filter(|&(source, target)| source < node_count && target < node_count)
            .collect();

        let mut degree = vec![0usize; node_count];
        for &(source, target) in &links {
            degree[source] += 1;
            degree[target] += 1;
        }

        let springs = links
            .into_iter()
            .filter(|(source, target)| source != target)
            .map(|(source, target)| {
                let (ds, dt) = (degree[source] as f64, degree[target] as f64);
                Spring {
                    source,
                    target,
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect();

        Self { springs, distance }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(
        &self,
        nodes: &mut [SimNode],
        alpha: f64,
        rng: &mut StdRng,
    ) {
        for spring in &self.springs {
            let source = &nodes[spring.source];
            let target = &nodes[spring.target];

            let mut x = target.x + target.vx - source.x - source.vx;
            let mut y = target.y + target.vy - source.y - source.vy;
            if x == 0.0 {
                x = jiggle(rng);
            }
            if y == 0.0 {
                y = jiggle(rng);
            }

            let length = (x * x + y * y).sqrt();
            let correction = (length - self.distance) / length * alpha * spring.strength;
            x *= correction;
            y *= correction;

            let target = &mut nodes[spring.target];
            target.vx -= x * spring.bias;
            target.vy -= y * spring.bias;

            let source = &mut nodes[spring.source];
            source.vx += x * (1.0 - spring.bias);
            source.vy += y * (1.0 - spring.bias);
        }
    }
}

/// Pairwise repulsion (or attraction for positive strength).
///
/// Pairs further apart than `distance_max` do not interact; separations below
/// `distance_min` are softened to keep the force finite.
#[derive(Debug, Clone)]
pub struct ManyBodyForce {
    strength: f64,
    distance_min2: f64,
    distance_max2: f64,
}

impl ManyBodyForce {
    pub fn new(
        strength: f64,
        distance_min: f64,
        distance_max: f64,
    ) -> Self {
        Self {
            strength,
            distance_min2: distance_min * distance_min,
            distance_max2: distance_max * distance_max,
        }
    }
}

impl Force for ManyBodyForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(
        &self,
        nodes: &mut [SimNode],
        alpha: f64,
        rng: &mut StdRng,
    ) {
        let n = nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let mut dx = nodes[j].x - nodes[i].x;
                let mut dy = nodes[j].y - nodes[i].y;
                let mut l = dx * dx + dy * dy;
                if l >= self.distance_max2 {
                    continue;
                }

                if dx == 0.0 {
                    dx = jiggle(rng);
                    l += dx * dx;
                }
                if dy == 0.0 {
                    dy = jiggle(rng);
                    l += dy * dy;
                }
                if l < self.distance_min2 {
                    l = (self.distance_min2 * l).sqrt();
                }

                let w = self.strength * alpha / l;
                nodes[i].vx += dx * w;
                nodes[i].vy += dy * w;
                nodes[j].vx -= dx * w;
                nodes[j].vy -= dy * w;
            }
        }
    }
}

/// Shifts the centre of mass toward `center`. Independent of alpha.
#[derive(Debug, Clone)]
pub struct CenterForce {
    center: Point,
    strength: f64,
}

impl CenterForce {
    pub fn new(
        center: Point,
        strength: f64,
    ) -> Self {
        Self { center, strength }
    }
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(
        &self,
        nodes: &mut [SimNode],
        _alpha: f64,
        _rng: &mut StdRng,
    ) {
        if nodes.is_empty() {
            return;
        }

        let n = nodes.len() as f64;
        let sx = nodes.iter().map(|node| node.x).sum::<f64>() / n - self.center.x;
        let sy = nodes.iter().map(|node| node.y).sum::<f64>() / n - self.center.y;

        for node in nodes.iter_mut() {
            node.x -= sx * self.strength;
            node.y -= sy * self.strength;
        }
    }
}
