use serde::Deserialize;
use serde::Serialize;

/// A point in world (simulation) or screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self { x, y }
    }

    pub fn distance_to(
        &self,
        other: Point,
    ) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn offset(
        &self,
        dx: f64,
        dy: f64,
    ) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Inclusive bounds on the zoom factor. An inverted range pins to `max`; NaN bounds are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub fn clamp(
        &self,
        scale: f64,
    ) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Zoom/pan transform: `screen = world * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        translate: Point::new(0.0, 0.0),
    };

    pub fn apply(
        &self,
        world: Point,
    ) -> Point {
        Point::new(world.x * self.scale + self.translate.x, world.y * self.scale + self.translate.y)
    }

    pub fn invert(
        &self,
        screen: Point,
    ) -> Point {
        Point::new((screen.x - self.translate.x) / self.scale, (screen.y - self.translate.y) / self.scale)
    }

    pub fn pan(
        &mut self,
        dx: f64,
        dy: f64,
    ) {
        self.translate = self.translate.offset(dx, dy);
    }

    /// Multiply the scale by `factor`, keeping the world point under `anchor` fixed on screen.
    pub fn zoom_at(
        &mut self,
        anchor: Point,
        factor: f64,
        bounds: ScaleBounds,
    ) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let world = self.invert(anchor);
        self.scale = bounds.clamp(self.scale * factor);
        self.translate = Point::new(anchor.x - world.x * self.scale, anchor.y - world.y * self.scale);
    }
}
