use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::ALPHA_DECAY;
use crate::constants::ALPHA_MIN;
use crate::constants::ALPHA_TARGET_DRAG;
use crate::constants::CENTER_STRENGTH;
use crate::constants::CHARGE_DISTANCE_MAX;
use crate::constants::CHARGE_DISTANCE_MIN;
use crate::constants::CHARGE_STRENGTH;
use crate::constants::LINK_DISTANCE;
use crate::constants::MAX_TICKS;
use crate::constants::MAX_TICKS_PER_FRAME;
use crate::constants::SIMULATION_SEED;
use crate::constants::TICK_INTERVAL_MS;
use crate::constants::VELOCITY_DECAY;

/// Force and cooling parameters of the layout simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub link_distance: f64,
    /// Negative values repel
    pub charge_strength: f64,
    pub charge_distance_min: f64,
    pub charge_distance_max: f64,
    pub center_strength: f64,
    pub alpha_decay: f64,
    pub alpha_min: f64,
    pub alpha_target_drag: f64,
    pub velocity_decay: f64,
    pub max_ticks: usize,
    pub max_ticks_per_frame: usize,
    pub tick_interval_ms: u64,
    pub seed: u64,
}

impl LayoutConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_distance: LINK_DISTANCE,
            charge_strength: CHARGE_STRENGTH,
            charge_distance_min: CHARGE_DISTANCE_MIN,
            charge_distance_max: CHARGE_DISTANCE_MAX,
            center_strength: CENTER_STRENGTH,
            alpha_decay: ALPHA_DECAY,
            alpha_min: ALPHA_MIN,
            alpha_target_drag: ALPHA_TARGET_DRAG,
            velocity_decay: VELOCITY_DECAY,
            max_ticks: MAX_TICKS,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
            tick_interval_ms: TICK_INTERVAL_MS,
            seed: SIMULATION_SEED,
        }
    }
}
