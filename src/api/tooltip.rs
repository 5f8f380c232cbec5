use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{DataSet, PixelPoint, RowId};
use crate::error::ChartResult;
use crate::interaction::SelectionState;

use super::{CentroidSource, ChartAdapter, GridView, RowStyle, TooltipStyle, project_centroids};

/// Value label pinned next to one line vertex, in plot-area pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub row: RowId,
    pub dimension: String,
    pub text: String,
    /// Text anchor (centered, baseline) at the row's axis crossing.
    pub anchor: PixelPoint,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lays out one tooltip per axis for each of `rows`.
///
/// Centroids come from `source` and are shifted back by its margins, so boxes
/// are expressed relative to the plot area.
pub fn layout_tooltips<S>(
    source: &S,
    dataset: &DataSet,
    rows: &[RowId],
    style: TooltipStyle,
) -> ChartResult<Vec<Tooltip>>
where
    S: CentroidSource + ?Sized,
{
    let margins = source.margins();
    let projected = project_centroids(source, rows)?;
    let mut tooltips = Vec::with_capacity(rows.len() * dataset.columns().len());

    for (&row, centroids) in rows.iter().zip(projected) {
        for (column, centroid) in centroids.into_iter().enumerate() {
            let text = dataset.value_at(row, column)?.label();
            let width = text.chars().count() as f64 * style.char_width_px;
            let anchor = centroid.offset(-margins.left, -margins.top);
            tooltips.push(Tooltip {
                row,
                dimension: dataset.columns()[column].clone(),
                text,
                anchor,
                x: anchor.x - width / 2.0,
                y: anchor.y - style.box_height() + 2.0 * style.padding_px,
                width,
                height: style.box_height(),
            });
        }
    }
    Ok(tooltips)
}

/// Keeps chart emphasis, tooltips and grid row styles in step with the
/// selection. Tooltips are rebuilt from scratch on every sync.
#[derive(Debug, Clone)]
pub struct HighlightController {
    style: TooltipStyle,
    tooltips: Vec<Tooltip>,
}

impl HighlightController {
    #[must_use]
    pub fn new(style: TooltipStyle) -> Self {
        Self {
            style,
            tooltips: Vec::new(),
        }
    }

    #[must_use]
    pub fn tooltips(&self) -> &[Tooltip] {
        &self.tooltips
    }

    pub fn clear(&mut self) {
        self.tooltips.clear();
    }

    /// Pushes the effective highlight to the chart and pinned rows to the grid.
    pub fn sync(
        &mut self,
        adapter: &mut ChartAdapter,
        grid: &mut GridView,
        selection: &SelectionState,
        grid_style: RowStyle,
    ) -> ChartResult<()> {
        self.clear();
        match selection.effective_highlight() {
            Some((rows, source)) => {
                adapter.highlight(rows);
                self.tooltips = layout_tooltips(&*adapter, adapter.data(), rows, self.style)?;
                trace!(
                    rows = rows.len(),
                    ?source,
                    tooltips = self.tooltips.len(),
                    "highlight synced"
                );
            }
            None => adapter.unhighlight(),
        }

        grid.clear_highlight();
        grid.apply_highlight(selection.pinned(), grid_style);
        Ok(())
    }
}
