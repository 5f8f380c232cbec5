use tracing::{debug, trace, warn};

use crate::core::{DataSet, PixelPoint, RowId};
use crate::error::ChartResult;
use crate::interaction::{InteractionEvent, SelectionState};
use crate::render::{RenderFrame, Renderer};

use super::config::DEFAULT_INITIAL_COLOR_COLUMN;
use super::frame_builder::FrameBuilder;
use super::{
    ChartAdapter, ColorScale, GridView, HighlightController, LineHit, ParcoordsConfig, Tooltip,
    hit_test_lines,
};

/// What one `dispatch` call changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchOutcome {
    /// The active (brushed) row subset differs from before the event.
    pub active_changed: bool,
    /// Line colors were recomputed.
    pub recolored: bool,
    /// The highlighted row set differs from before the event.
    pub highlight_changed: bool,
    /// Result of the hit-test behind a chart click.
    pub hit: Option<LineHit>,
}

/// Interactive parallel-coordinates session.
///
/// Owns the chart adapter, the synchronized grid, the selection and the
/// tooltip overlay. Host input is fed through [`ParcoordsSession::dispatch`];
/// every call runs to completion and leaves chart, grid and tooltips in step.
pub struct ParcoordsSession<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ParcoordsConfig,
    pub(super) adapter: ChartAdapter,
    pub(super) grid: GridView,
    pub(super) selection: SelectionState,
    pub(super) highlight: HighlightController,
    pub(super) color_scale: ColorScale,
    pub(super) color_dimension: Option<String>,
}

impl<R: Renderer> ParcoordsSession<R> {
    /// Lays out the chart, fills the grid with every row and applies the
    /// initial coloring (configured dimension, else the third column).
    pub fn new(renderer: R, dataset: DataSet, config: ParcoordsConfig) -> ChartResult<Self> {
        let adapter = ChartAdapter::from_config(dataset, &config)?;
        let mut grid = GridView::new(adapter.data().columns().to_vec(), config.grid_total_width_px);
        let active = adapter.active_rows()?;
        grid.render_rows(active.clone());

        let initial_dimension = config.initial_color_dimension.clone().or_else(|| {
            adapter
                .data()
                .columns()
                .get(DEFAULT_INITIAL_COLOR_COLUMN)
                .cloned()
        });

        let mut session = Self {
            renderer,
            highlight: HighlightController::new(config.tooltip_style),
            color_scale: ColorScale::new(config.color_scale),
            color_dimension: None,
            selection: SelectionState::with_active(active),
            grid,
            adapter,
            config,
        };
        if let Some(dimension) = initial_dimension {
            session.recolor_by_dimension(&dimension)?;
        }

        debug!(
            rows = session.adapter.data().len(),
            columns = session.adapter.data().columns().len(),
            color_dimension = ?session.color_dimension,
            "parcoords session created"
        );
        Ok(session)
    }

    /// Applies one interaction and resynchronizes chart, grid and tooltips.
    pub fn dispatch(&mut self, event: InteractionEvent) -> ChartResult<DispatchOutcome> {
        trace!(?event, "dispatch interaction");
        let active_before = self.selection.active().to_vec();
        let highlighted_before = self.adapter.highlighted().to_vec();
        let mut outcome = DispatchOutcome::default();

        match event {
            InteractionEvent::BrushChanged { dimension, extent } => {
                match extent {
                    Some(extent) => self.adapter.set_brush(&dimension, extent)?,
                    None => {
                        self.adapter.clear_brush(&dimension)?;
                    }
                }
                self.sync_active()?;
            }
            InteractionEvent::BrushesReset => {
                self.adapter.clear_brushes();
                self.sync_active()?;
            }
            InteractionEvent::AxisClicked { dimension } => {
                self.recolor_by_dimension(&dimension)?;
                outcome.recolored = true;
            }
            InteractionEvent::ChartClicked { x, y } => {
                let hit = self.hit_test(PixelPoint::new(x, y))?;
                // A click replaces any lingering hover, pinned or not.
                self.selection.clear_hovered();
                if hit.is_empty() {
                    self.selection.clear_pinned();
                } else {
                    self.selection.pin(hit.rows.to_vec());
                }
                self.sync_highlight()?;
                outcome.hit = Some(hit);
            }
            InteractionEvent::RowHovered { row } => {
                if self.grid.position_of(row).is_some() {
                    self.selection.hover(vec![row]);
                    self.sync_highlight()?;
                } else {
                    warn!(%row, "ignoring hover on a row the grid does not show");
                }
            }
            InteractionEvent::RowHoverEnded => {
                self.selection.clear_hovered();
                self.sync_highlight()?;
            }
            InteractionEvent::Resized { viewport } => {
                self.adapter.resize(viewport)?;
                self.config.viewport = viewport;
                self.sync_active()?;
            }
        }

        outcome.active_changed = self.selection.active() != active_before.as_slice();
        outcome.highlight_changed = self.adapter.highlighted() != highlighted_before.as_slice();
        Ok(outcome)
    }

    /// Colors every line by `dimension` over the full dataset and bolds its
    /// axis label.
    pub fn recolor_by_dimension(&mut self, dimension: &str) -> ChartResult<ColorScale> {
        let scale = self
            .adapter
            .color_by_dimension(dimension, ColorScale::new(self.config.color_scale))?;
        self.color_scale = scale;
        self.color_dimension = Some(dimension.to_owned());
        Ok(scale)
    }

    /// Active lines passing near `point` (viewport pixels).
    pub fn hit_test(&self, point: PixelPoint) -> ChartResult<LineHit> {
        hit_test_lines(&self.adapter, point, self.config.hit_tolerance_px)
    }

    /// Pins `rows` as the click highlight. Rows outside the active subset are
    /// ignored.
    pub fn highlight_rows(&mut self, rows: &[RowId]) -> ChartResult<()> {
        let active = self.selection.active();
        let rows = rows
            .iter()
            .copied()
            .filter(|row| active.contains(row))
            .collect();
        self.selection.pin(rows);
        self.sync_highlight()
    }

    /// Drops pinned and hovered highlights along with their tooltips and
    /// grid row styles.
    pub fn clear_highlight(&mut self) -> ChartResult<()> {
        self.selection.clear_pinned();
        self.selection.clear_hovered();
        self.sync_highlight()
    }

    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        FrameBuilder::new(&self.adapter, &self.config, self.highlight.tooltips()).build()
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        trace!(
            polylines = frame.polylines.len(),
            texts = frame.texts.len(),
            tooltips = frame.tooltips.rects.len(),
            "render frame"
        );
        self.renderer.render(&frame)
    }

    pub fn grid_html(&self) -> ChartResult<String> {
        self.grid.to_html(self.adapter.data())
    }

    #[must_use]
    pub fn adapter(&self) -> &ChartAdapter {
        &self.adapter
    }

    #[must_use]
    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn tooltips(&self) -> &[Tooltip] {
        self.highlight.tooltips()
    }

    #[must_use]
    pub fn color_scale(&self) -> ColorScale {
        self.color_scale
    }

    #[must_use]
    pub fn color_dimension(&self) -> Option<&str> {
        self.color_dimension.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &ParcoordsConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn sync_active(&mut self) -> ChartResult<()> {
        let active = self.adapter.active_rows()?;
        debug!(
            active = active.len(),
            brushes = self.adapter.brushes().len(),
            "active subset updated"
        );
        self.grid.render_rows(active.clone());
        self.selection.set_active(active);
        self.sync_highlight()
    }

    fn sync_highlight(&mut self) -> ChartResult<()> {
        self.highlight.sync(
            &mut self.adapter,
            &mut self.grid,
            &self.selection,
            self.config.grid_highlight,
        )
    }
}
