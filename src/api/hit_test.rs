use smallvec::SmallVec;
use tracing::trace;

use crate::core::{PixelPoint, RowId, is_on_line, locate_segment};
use crate::error::ChartResult;

use super::{CentroidSource, project_centroids};

/// Result of picking lines at one pointer position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineHit {
    /// Left axis index of the segment under the pointer; `None` outside the
    /// axis range.
    pub segment: Option<usize>,
    pub rows: SmallVec<[RowId; 4]>,
    /// Centroids of each hit row, parallel to `rows`.
    pub centroids: Vec<Vec<PixelPoint>>,
}

impl LineHit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Finds every active line passing within `tolerance` pixels of `point`.
///
/// Centroids are projected fresh from `source`, so the result always reflects
/// the current brush and layout. Linear in the number of active rows.
pub fn hit_test_lines<S>(source: &S, point: PixelPoint, tolerance: f64) -> ChartResult<LineHit>
where
    S: CentroidSource + ?Sized,
{
    let active = source.active_rows()?;
    let projected = project_centroids(source, &active)?;
    let Some(segment) = locate_segment(&source.axis_positions(), point.x) else {
        trace!(x = point.x, "click outside axis range");
        return Ok(LineHit::default());
    };

    let mut hit = LineHit {
        segment: Some(segment),
        ..LineHit::default()
    };
    for (row, centroids) in active.into_iter().zip(projected) {
        let (Some(&start), Some(&end)) = (centroids.get(segment), centroids.get(segment + 1))
        else {
            continue;
        };
        if is_on_line(start, end, point, tolerance) {
            hit.rows.push(row);
            hit.centroids.push(centroids);
        }
    }

    trace!(
        x = point.x,
        y = point.y,
        segment,
        hits = hit.rows.len(),
        "line hit-test"
    );
    Ok(hit)
}
