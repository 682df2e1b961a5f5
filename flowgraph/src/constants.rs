/// ======================= Ledger units =======================
/// Subunits (satoshis) per whole coin
pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Primary address used when a single-transaction view has no resolvable input
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Currency suffix shown in tooltips and summaries
pub const CURRENCY_SYMBOL: &str = "BTC";

/// ======================= Forces =======================
pub const LINK_DISTANCE: f64 = 80.0;

pub const CHARGE_STRENGTH: f64 = -200.0;

pub const CHARGE_DISTANCE_MIN: f64 = 1.0;

/// Repulsion is zero beyond this separation
pub const CHARGE_DISTANCE_MAX: f64 = 200.0;

pub const CENTER_STRENGTH: f64 = 1.0;

/// ======================= Cooling =======================
pub const ALPHA_START: f64 = 1.0;

pub const ALPHA_DECAY: f64 = 0.1;

pub const ALPHA_MIN: f64 = 0.001;

/// Energy target held while a node is being dragged
pub const ALPHA_TARGET_DRAG: f64 = 0.3;

/// Fraction of velocity lost per tick
pub const VELOCITY_DECAY: f64 = 0.4;

/// Safety bound on ticks per run, reset whenever energy is injected
pub const MAX_TICKS: usize = 300;

pub const MAX_TICKS_PER_FRAME: usize = 4;

pub const TICK_INTERVAL_MS: u64 = 16;

pub const SIMULATION_SEED: u64 = 0x5eed_f10e;

/// Phyllotaxis seeding for nodes without a position
pub const INITIAL_RADIUS: f64 = 10.0;

pub const JIGGLE_SCALE: f64 = 1e-6;

/// ======================= View =======================
pub const MIN_SCALE: f64 = 0.5;

pub const MAX_SCALE: f64 = 3.0;

pub const WHEEL_ZOOM_RATE: f64 = 0.002;

/// Pointer travel (screen units) after which a press stops counting as a click
pub const CLICK_DISTANCE: f64 = 0.0;

pub const SURFACE_WIDTH: f64 = 960.0;

pub const SURFACE_HEIGHT: f64 = 500.0;

/// ======================= Chrome =======================
pub const TITLE: &str = "Transaction Flow Visualization";

pub const HEADER_HEIGHT: f64 = 40.0;

pub const LEGEND_OFFSET_X: f64 = 150.0;

pub const LEGEND_OFFSET_Y: f64 = 20.0;

pub const LEGEND_ROW_HEIGHT: f64 = 20.0;

pub const SELECTION_RING_PADDING: f64 = 4.0;

pub const TOOLTIP_OFFSET_X: f64 = 10.0;

pub const TOOLTIP_OFFSET_Y: f64 = -10.0;

pub const LABEL_PREFIX_CHARS: usize = 8;

pub const DEFAULT_NODE_RADIUS: f64 = 5.0;

pub const MIN_LINK_WIDTH: f64 = 0.5;
