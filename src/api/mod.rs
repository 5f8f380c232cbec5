mod centroid_source;
mod chart_adapter;
mod color_by_dimension;
mod config;
mod frame_builder;
mod grid_view;
mod hit_test;
mod json_contract;
mod session;
mod snapshot;
mod tooltip;

pub use centroid_source::{CentroidSource, project_centroids};
pub use chart_adapter::{Axis, ChartAdapter};
pub use color_by_dimension::ColorScale;
pub use config::{
    AxisStyle, ColorScaleConfig, DEFAULT_GRID_TOTAL_WIDTH_PX, DEFAULT_INITIAL_COLOR_COLUMN,
    DEFAULT_INSTRUCTIONS, LineStyle, MarginPolicy, ParcoordsConfig, RowStyle, TooltipStyle,
};
pub use grid_view::GridView;
pub use hit_test::{LineHit, hit_test_lines};
pub use json_contract::{SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshotJsonContractV1};
pub use session::{DispatchOutcome, ParcoordsSession};
pub use snapshot::{BrushSnapshot, GridSnapshot, SessionSnapshot};
pub use tooltip::{HighlightController, Tooltip, layout_tooltips};
