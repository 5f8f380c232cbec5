use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{AxisScale, CellValue, DataSet, Margins, PixelPoint, PointScale, RowId, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BrushExtent;
use crate::render::Color;

use super::ParcoordsConfig;

/// One vertical axis: a dataset column placed at `x_px` inside the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    dimension: String,
    x_px: f64,
    scale: AxisScale,
}

impl Axis {
    #[must_use]
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    /// Horizontal position relative to the plot area.
    #[must_use]
    pub fn x_px(&self) -> f64 {
        self.x_px
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Vertical position of `value` relative to the plot area.
    #[must_use]
    pub fn y_for(&self, value: &CellValue) -> f64 {
        match &self.scale {
            AxisScale::Linear(scale) => scale.map(value.as_number()),
            AxisScale::Point(scale) => scale.map(&value.label()).unwrap_or(f64::NAN),
        }
    }
}

/// Chart surface state: data, axis layout, brushes, line colors and the
/// highlighted row set.
///
/// Everything geometric is derived from the current viewport and margins on
/// demand; nothing positional is cached per row.
#[derive(Debug, Clone)]
pub struct ChartAdapter {
    dataset: DataSet,
    viewport: Viewport,
    margins: Margins,
    axes: Vec<Axis>,
    brushes: IndexMap<String, BrushExtent>,
    line_colors: Vec<Color>,
    highlighted: Vec<RowId>,
    bold_dimension: Option<String>,
}

impl ChartAdapter {
    /// Lays out one axis per column; every line starts with `line_color`.
    pub fn new(
        dataset: DataSet,
        viewport: Viewport,
        margins: Margins,
        line_color: Color,
    ) -> ChartResult<Self> {
        viewport.validate()?;
        margins.validate_for(viewport)?;
        line_color.validate()?;
        let axes = build_axes(&dataset, margins, viewport)?;
        debug!(
            rows = dataset.len(),
            axes = axes.len(),
            left_margin = margins.left,
            "chart adapter laid out"
        );
        Ok(Self {
            line_colors: vec![line_color; dataset.len()],
            dataset,
            viewport,
            margins,
            axes,
            brushes: IndexMap::new(),
            highlighted: Vec::new(),
            bold_dimension: None,
        })
    }

    /// Builds the adapter with margins sized by `config.margin_policy`.
    pub fn from_config(dataset: DataSet, config: &ParcoordsConfig) -> ChartResult<Self> {
        config.validate()?;
        let margins = config.margin_policy.margins_for(&dataset);
        Self::new(dataset, config.viewport, margins, config.color_scale.start)
    }

    /// Full dataset, regardless of brushes.
    #[must_use]
    pub fn data(&self) -> &DataSet {
        &self.dataset
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[must_use]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    #[must_use]
    pub fn inner_height(&self) -> f64 {
        self.margins.inner_height(self.viewport)
    }

    /// Re-lays the axes for a new viewport. Brush extents keep their relative
    /// position on the axis.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        viewport.validate()?;
        self.margins.validate_for(viewport)?;
        let old_height = self.inner_height();
        self.viewport = viewport;
        let height = self.inner_height();
        let count = self.axes.len();
        // Domains depend on the data only; just the pixel ranges move.
        for (column, axis) in self.axes.iter_mut().enumerate() {
            axis.x_px = axis_x_px(column, count, self.margins.inner_width(viewport));
            axis.scale = axis.scale.clone().with_range(height, 0.0);
        }
        let factor = height / old_height;
        for extent in self.brushes.values_mut() {
            *extent = extent.scaled(factor);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "chart adapter resized"
        );
        Ok(())
    }

    fn axis_index(&self, dimension: &str) -> ChartResult<usize> {
        self.axes
            .iter()
            .position(|axis| axis.dimension == dimension)
            .ok_or_else(|| ChartError::UnknownDimension(dimension.to_owned()))
    }

    #[must_use]
    pub fn axis(&self, dimension: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.dimension == dimension)
    }

    /// Axis crossings of `row`, relative to the plot area.
    pub fn plot_centroids(&self, row: RowId) -> ChartResult<Vec<PixelPoint>> {
        self.axes
            .iter()
            .enumerate()
            .map(|(column, axis)| {
                let value = self.dataset.value_at(row, column)?;
                Ok(PixelPoint::new(axis.x_px, axis.y_for(value)))
            })
            .collect()
    }

    pub fn set_brush(&mut self, dimension: &str, extent: BrushExtent) -> ChartResult<()> {
        self.axis_index(dimension)?;
        trace!(dimension, extent.start_px, extent.end_px, "set brush");
        self.brushes.insert(dimension.to_owned(), extent);
        Ok(())
    }

    /// Removes the brush of one axis; returns whether one was set.
    pub fn clear_brush(&mut self, dimension: &str) -> ChartResult<bool> {
        self.axis_index(dimension)?;
        Ok(self.brushes.shift_remove(dimension).is_some())
    }

    pub fn clear_brushes(&mut self) {
        self.brushes.clear();
    }

    #[must_use]
    pub fn brushes(&self) -> &IndexMap<String, BrushExtent> {
        &self.brushes
    }

    /// Value range covered by a brush on a linear axis.
    #[must_use]
    pub fn brush_value_range(&self, dimension: &str) -> Option<(f64, f64)> {
        let extent = self.brushes.get(dimension)?;
        match self.axis(dimension)?.scale() {
            AxisScale::Linear(scale) => {
                let a = scale.invert(extent.start_px);
                let b = scale.invert(extent.end_px);
                Some((a.min(b), a.max(b)))
            }
            AxisScale::Point(_) => None,
        }
    }

    /// Rows inside every brush, or `None` while no brush is set.
    pub fn brushed(&self) -> ChartResult<Option<Vec<RowId>>> {
        if self.brushes.is_empty() {
            return Ok(None);
        }
        let filters = self
            .brushes
            .iter()
            .map(|(dimension, extent)| Ok((self.axis_index(dimension)?, *extent)))
            .collect::<ChartResult<Vec<_>>>()?;

        let mut rows = Vec::new();
        for row in self.dataset.row_ids() {
            let mut inside = true;
            for &(column, extent) in &filters {
                let y = self.axes[column].y_for(self.dataset.value_at(row, column)?);
                if !extent.contains(y) {
                    inside = false;
                    break;
                }
            }
            if inside {
                rows.push(row);
            }
        }
        Ok(Some(rows))
    }

    /// Brushed rows, or the full dataset while no brush is set.
    pub fn active_rows(&self) -> ChartResult<Vec<RowId>> {
        Ok(self
            .brushed()?
            .unwrap_or_else(|| self.dataset.row_ids().collect()))
    }

    pub fn set_line_colors(&mut self, colors: Vec<Color>) -> ChartResult<()> {
        if colors.len() != self.dataset.len() {
            return Err(ChartError::InvalidData(format!(
                "expected {} line colors, got {}",
                self.dataset.len(),
                colors.len()
            )));
        }
        self.line_colors = colors;
        Ok(())
    }

    pub fn line_color(&self, row: RowId) -> ChartResult<Color> {
        self.line_colors
            .get(row.index())
            .copied()
            .ok_or(ChartError::RowOutOfRange {
                row: row.index(),
                len: self.line_colors.len(),
            })
    }

    #[must_use]
    pub fn line_colors(&self) -> &[Color] {
        &self.line_colors
    }

    pub fn set_bold_dimension(&mut self, dimension: Option<&str>) -> ChartResult<()> {
        if let Some(dimension) = dimension {
            self.axis_index(dimension)?;
        }
        self.bold_dimension = dimension.map(str::to_owned);
        Ok(())
    }

    #[must_use]
    pub fn bold_dimension(&self) -> Option<&str> {
        self.bold_dimension.as_deref()
    }

    pub fn highlight(&mut self, rows: &[RowId]) {
        self.highlighted = rows.to_vec();
    }

    pub fn unhighlight(&mut self) {
        self.highlighted.clear();
    }

    #[must_use]
    pub fn highlighted(&self) -> &[RowId] {
        &self.highlighted
    }
}

fn axis_x_px(column: usize, count: usize, width: f64) -> f64 {
    (column as f64 + 0.5) * width / count as f64
}

fn build_axes(dataset: &DataSet, margins: Margins, viewport: Viewport) -> ChartResult<Vec<Axis>> {
    let width = margins.inner_width(viewport);
    let height = margins.inner_height(viewport);
    let count = dataset.columns().len();

    dataset
        .columns()
        .iter()
        .enumerate()
        .map(|(column, dimension)| {
            let x_px = axis_x_px(column, count, width);
            let scale = if !dataset.is_empty() && dataset.is_numeric_column(column) {
                AxisScale::linear_from_values(&dataset.numeric_values(dimension)?, (height, 0.0))?
            } else {
                let labels = dataset
                    .row_ids()
                    .map(|row| dataset.value_at(row, column).map(CellValue::label))
                    .collect::<ChartResult<Vec<_>>>()?;
                AxisScale::Point(PointScale::new(labels, (height, 0.0)))
            };
            Ok(Axis {
                dimension: dimension.clone(),
                x_px,
                scale,
            })
        })
        .collect()
}
