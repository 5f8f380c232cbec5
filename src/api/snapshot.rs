use serde::{Deserialize, Serialize};

use crate::core::{Margins, RowId, Viewport};
use crate::interaction::BrushExtent;
use crate::render::Renderer;

use super::{ParcoordsSession, Tooltip};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushSnapshot {
    pub dimension: String,
    pub extent: BrushExtent,
    /// Data range covered by the brush; `None` on text axes.
    pub value_range: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cell_width_px: u32,
    pub visible_rows: Vec<RowId>,
    pub styled_rows: Vec<RowId>,
}

/// Serializable view of everything a session currently shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub viewport: Viewport,
    pub margins: Margins,
    pub dimensions: Vec<String>,
    pub color_dimension: Option<String>,
    pub color_domain: Option<(f64, f64)>,
    pub active_rows: Vec<RowId>,
    pub pinned_rows: Vec<RowId>,
    pub hovered_rows: Vec<RowId>,
    pub highlighted_rows: Vec<RowId>,
    pub brushes: Vec<BrushSnapshot>,
    pub tooltips: Vec<Tooltip>,
    pub grid: GridSnapshot,
}

impl<R: Renderer> ParcoordsSession<R> {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let brushes = self
            .adapter
            .brushes()
            .iter()
            .map(|(dimension, extent)| BrushSnapshot {
                dimension: dimension.clone(),
                extent: *extent,
                value_range: self.adapter.brush_value_range(dimension),
            })
            .collect();

        SessionSnapshot {
            viewport: self.adapter.viewport(),
            margins: self.adapter.margins(),
            dimensions: self.adapter.data().columns().to_vec(),
            color_dimension: self.color_dimension.clone(),
            color_domain: self.color_scale.domain(),
            active_rows: self.selection.active().to_vec(),
            pinned_rows: self.selection.pinned().to_vec(),
            hovered_rows: self.selection.hovered().to_vec(),
            highlighted_rows: self.adapter.highlighted().to_vec(),
            brushes,
            tooltips: self.highlight.tooltips().to_vec(),
            grid: GridSnapshot {
                cell_width_px: self.grid.cell_width_px(),
                visible_rows: self.grid.visible_rows().to_vec(),
                styled_rows: self.grid.styled_rows(),
            },
        }
    }
}
