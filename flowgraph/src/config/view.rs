use serde::Deserialize;
use serde::Serialize;

use crate::constants::CLICK_DISTANCE;
use crate::constants::MAX_SCALE;
use crate::constants::MIN_SCALE;
use crate::constants::SURFACE_HEIGHT;
use crate::constants::SURFACE_WIDTH;
use crate::constants::WHEEL_ZOOM_RATE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub wheel_zoom_rate: f64,
    pub click_distance: f64,
    // Surface size used by the runner's SVG output
    pub width: f64,
    pub height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_zoom_rate: WHEEL_ZOOM_RATE,
            click_distance: CLICK_DISTANCE,
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
        }
    }
}
