//! parcoords-rs: headless parallel-coordinates chart bound to a row grid.
//!
//! The crate owns the chart session (axis layout, brushes, line colors,
//! highlight and tooltip state) and a synchronized grid view. Interactions are
//! plain `InteractionEvent` values dispatched through `ParcoordsSession`, and
//! drawing goes through the backend-agnostic `render::Renderer` contract.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ParcoordsConfig, ParcoordsSession};
pub use error::{ChartError, ChartResult};
