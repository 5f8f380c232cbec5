use serde::{Deserialize, Serialize};

use crate::core::{RowId, Viewport};
use crate::error::{ChartError, ChartResult};

/// Vertical brush range on one axis, in plot-area pixels (0 = top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushExtent {
    pub start_px: f64,
    pub end_px: f64,
}

impl BrushExtent {
    /// Builds an extent from two drag endpoints in any order.
    pub fn new(a: f64, b: f64) -> ChartResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "brush extent must be finite".to_owned(),
            ));
        }
        Ok(Self {
            start_px: a.min(b),
            end_px: a.max(b),
        })
    }

    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        (self.start_px..=self.end_px).contains(&y)
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            start_px: self.start_px * factor,
            end_px: self.end_px * factor,
        }
    }
}

/// Everything the host can report about user input.
///
/// Pointer coordinates are viewport pixels, as reported relative to the chart
/// surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// A brush was dragged (`Some`) or cleared (`None`) on one axis.
    BrushChanged {
        dimension: String,
        extent: Option<BrushExtent>,
    },
    BrushesReset,
    /// Axis label clicked: recolor by that dimension.
    AxisClicked { dimension: String },
    ChartClicked { x: f64, y: f64 },
    RowHovered { row: RowId },
    RowHoverEnded,
    Resized { viewport: Viewport },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightSource {
    Click,
    Hover,
}

/// Row-level selection state of a session.
///
/// The pinned set comes from line clicks and survives hovering; the hovered
/// set is transient and takes precedence while present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    active: Vec<RowId>,
    pinned: Vec<RowId>,
    hovered: Vec<RowId>,
}

impl SelectionState {
    #[must_use]
    pub fn with_active(active: Vec<RowId>) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active(&self) -> &[RowId] {
        &self.active
    }

    #[must_use]
    pub fn pinned(&self) -> &[RowId] {
        &self.pinned
    }

    #[must_use]
    pub fn hovered(&self) -> &[RowId] {
        &self.hovered
    }

    /// Replaces the active subset and drops pinned or hovered rows that left it.
    pub fn set_active(&mut self, active: Vec<RowId>) {
        self.pinned.retain(|row| active.contains(row));
        self.hovered.retain(|row| active.contains(row));
        self.active = active;
    }

    pub fn pin(&mut self, rows: Vec<RowId>) {
        self.pinned = rows;
    }

    pub fn clear_pinned(&mut self) {
        self.pinned.clear();
    }

    pub fn hover(&mut self, rows: Vec<RowId>) {
        self.hovered = rows;
    }

    pub fn clear_hovered(&mut self) {
        self.hovered.clear();
    }

    /// Rows currently emphasized and why, `None` when nothing is.
    #[must_use]
    pub fn effective_highlight(&self) -> Option<(&[RowId], HighlightSource)> {
        if !self.hovered.is_empty() {
            Some((self.hovered.as_slice(), HighlightSource::Hover))
        } else if !self.pinned.is_empty() {
            Some((self.pinned.as_slice(), HighlightSource::Click))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BrushExtent, HighlightSource, InteractionEvent, SelectionState};
    use crate::core::RowId;

    #[test]
    fn brush_extent_normalizes_drag_direction() {
        let extent = BrushExtent::new(80.0, 20.0).expect("extent");
        assert_eq!(extent.start_px, 20.0);
        assert_eq!(extent.end_px, 80.0);
        assert!(extent.contains(20.0));
        assert!(extent.contains(80.0));
        assert!(!extent.contains(80.5));
        assert!(BrushExtent::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn hover_takes_precedence_and_pinned_survives_it() {
        let mut selection = SelectionState::with_active(vec![RowId(0), RowId(1), RowId(2)]);
        selection.pin(vec![RowId(1)]);
        selection.hover(vec![RowId(2)]);
        assert_eq!(
            selection.effective_highlight(),
            Some((&[RowId(2)][..], HighlightSource::Hover))
        );
        selection.clear_hovered();
        assert_eq!(
            selection.effective_highlight(),
            Some((&[RowId(1)][..], HighlightSource::Click))
        );
    }

    #[test]
    fn shrinking_active_subset_unpins_filtered_rows() {
        let mut selection = SelectionState::with_active(vec![RowId(0), RowId(1)]);
        selection.pin(vec![RowId(0), RowId(1)]);
        selection.set_active(vec![RowId(1)]);
        assert_eq!(selection.pinned(), &[RowId(1)]);
    }

    #[test]
    fn events_use_tagged_json() {
        let event: InteractionEvent =
            serde_json::from_str(r#"{"kind":"chart_clicked","x":12.5,"y":40.0}"#)
                .expect("event json");
        assert_eq!(event, InteractionEvent::ChartClicked { x: 12.5, y: 40.0 });
    }
}
