pub mod dataset;
pub mod geometry;
pub mod scale;
pub mod types;

pub use dataset::{CellValue, DataSet, Row, RowId, parse_float_prefix};
pub use geometry::{DEFAULT_HIT_TOLERANCE_PX, distance_to_line, is_on_line, locate_segment};
pub use scale::{AxisScale, LinearScale, PointScale};
pub use types::{Margins, PixelPoint, Viewport};
