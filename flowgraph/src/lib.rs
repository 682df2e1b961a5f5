pub mod builder;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod handler;
pub mod ingest;
pub mod layout;
pub mod model;
pub mod tracing;
pub mod utils;

pub use builder::build_graph;
pub use error::*;
pub use layout::LayoutEngine;
pub use crate::tracing::setup_tracing;
