use crate::core::{Margins, PixelPoint, RowId};
use crate::error::ChartResult;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use super::ChartAdapter;

/// Geometry any chart backend exposes for hit-testing and tooltip placement.
///
/// All coordinates are viewport pixels with margins applied. Implementations
/// must derive them from their current layout on every call.
pub trait CentroidSource: Sync {
    /// Axis x positions, ascending.
    fn axis_positions(&self) -> Vec<f64>;

    /// Rows currently drawn (the brushed subset, or every row).
    fn active_rows(&self) -> ChartResult<Vec<RowId>>;

    /// One crossing point per axis for `row`, in axis order.
    fn centroids(&self, row: RowId) -> ChartResult<Vec<PixelPoint>>;

    fn margins(&self) -> Margins;
}

impl CentroidSource for ChartAdapter {
    fn axis_positions(&self) -> Vec<f64> {
        let left = self.margins().left;
        self.axes().iter().map(|axis| axis.x_px() + left).collect()
    }

    fn active_rows(&self) -> ChartResult<Vec<RowId>> {
        ChartAdapter::active_rows(self)
    }

    fn centroids(&self, row: RowId) -> ChartResult<Vec<PixelPoint>> {
        let margins = self.margins();
        Ok(self
            .plot_centroids(row)?
            .into_iter()
            .map(|point| point.offset(margins.left, margins.top))
            .collect())
    }

    fn margins(&self) -> Margins {
        ChartAdapter::margins(self)
    }
}

/// Centroids of every row in `rows`, in the same order.
pub fn project_centroids<S>(source: &S, rows: &[RowId]) -> ChartResult<Vec<Vec<PixelPoint>>>
where
    S: CentroidSource + ?Sized,
{
    #[cfg(feature = "parallel-projection")]
    {
        rows.par_iter().map(|&row| source.centroids(row)).collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        rows.iter().map(|&row| source.centroids(row)).collect()
    }
}
