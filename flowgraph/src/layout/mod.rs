//! Force-directed layout and pointer interaction for a [`crate::model::GraphModel`].

pub mod engine;
pub mod force;
pub mod interaction;
pub mod scene;
pub mod simulation;
pub mod style;
pub mod surface;
pub mod view;

pub use engine::EngineState;
pub use engine::LayoutEngine;
pub use engine::NodeClickCallback;
pub use interaction::Command;
pub use interaction::EngineEvent;
pub use interaction::PointerEvent;
pub use scene::Scene;
pub use surface::RenderSurface;
pub use surface::SurfaceSize;
pub use surface::SvgSurface;
pub use view::Point;
pub use view::ViewTransform;
