use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_HIT_TOLERANCE_PX, DataSet, Margins, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Instruction line drawn along the bottom edge of the chart.
pub const DEFAULT_INSTRUCTIONS: &str = "-Drag around axis to begin brush. -Click axis to clear brush.    -Click a label to color data based on axis values.   -Click on each line or hover on table to highlight.";

/// Total grid width shared evenly between columns.
pub const DEFAULT_GRID_TOTAL_WIDTH_PX: f64 = 960.0;

/// Column whose values color the lines at session start, unless configured.
pub const DEFAULT_INITIAL_COLOR_COLUMN: usize = 2;

/// Fixed top/right/bottom margins; the left margin grows with the first
/// column's longest label so row names are not clipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginPolicy {
    pub top_px: f64,
    pub right_px: f64,
    pub bottom_px: f64,
    pub left_px_per_label_char: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self {
            top_px: 25.0,
            right_px: 0.0,
            bottom_px: 40.0,
            left_px_per_label_char: 3.0,
        }
    }
}

impl MarginPolicy {
    #[must_use]
    pub fn margins_for(self, dataset: &DataSet) -> Margins {
        let label_chars = dataset.first_column_label_chars() as f64;
        Margins::new(
            self.top_px,
            self.right_px,
            self.bottom_px,
            self.left_px_per_label_char * label_chars,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Opacity of regular foreground lines.
    pub alpha: f64,
    pub stroke_width_px: f64,
    pub highlight_stroke_width_px: f64,
    /// Opacity of non-highlighted lines while a highlight is shown.
    pub faded_alpha: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            alpha: 0.6,
            stroke_width_px: 1.0,
            highlight_stroke_width_px: 2.0,
            faded_alpha: 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleConfig {
    pub start: Color,
    pub end: Color,
    /// Color for cells that do not read as numbers.
    pub missing: Color,
}

impl Default for ColorScaleConfig {
    fn default() -> Self {
        Self {
            start: Color::rgb8(0x46, 0x82, 0xb4),
            end: Color::rgb8(0xa5, 0x2a, 0x2a),
            missing: Color::rgb8(0xbb, 0xbb, 0xbb),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub color: Color,
    pub stroke_width_px: f64,
    pub label_font_size_px: f64,
    pub tick_font_size_px: f64,
    pub brush_fill: Color,
    pub brush_width_px: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0.0, 0.0, 0.0),
            stroke_width_px: 1.0,
            label_font_size_px: 14.0,
            tick_font_size_px: 10.0,
            brush_fill: Color::rgba(0.5, 0.5, 0.5, 0.3),
            brush_width_px: 16.0,
        }
    }
}

/// Tooltip box geometry: `width = chars × char_width`, centered on the anchor,
/// `height = font + 2 × padding`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub font_size_px: f64,
    pub padding_px: f64,
    pub char_width_px: f64,
    pub corner_radius_px: f64,
    pub fill: Color,
    pub text_color: Color,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14.0,
            padding_px: 2.0,
            char_width_px: 10.0,
            corner_radius_px: 2.0,
            fill: Color::rgba(0.5, 0.5, 0.5, 0.9),
            text_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl TooltipStyle {
    #[must_use]
    pub fn box_height(self) -> f64 {
        self.font_size_px + 2.0 * self.padding_px
    }
}

/// Inline style applied to highlighted grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowStyle {
    pub color: Color,
    pub bold: bool,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb8(0xff, 0xa5, 0x00),
            bold: true,
        }
    }
}

/// Session bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcoordsConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margin_policy: MarginPolicy,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub color_scale: ColorScaleConfig,
    #[serde(default)]
    pub axis_style: AxisStyle,
    #[serde(default = "default_hit_tolerance_px")]
    pub hit_tolerance_px: f64,
    #[serde(default)]
    pub tooltip_style: TooltipStyle,
    #[serde(default = "default_grid_total_width_px")]
    pub grid_total_width_px: f64,
    #[serde(default)]
    pub grid_highlight: RowStyle,
    #[serde(default)]
    pub initial_color_dimension: Option<String>,
    #[serde(default = "default_instructions")]
    pub instructions: Option<String>,
}

impl ParcoordsConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margin_policy: MarginPolicy::default(),
            line_style: LineStyle::default(),
            color_scale: ColorScaleConfig::default(),
            axis_style: AxisStyle::default(),
            hit_tolerance_px: default_hit_tolerance_px(),
            tooltip_style: TooltipStyle::default(),
            grid_total_width_px: default_grid_total_width_px(),
            grid_highlight: RowStyle::default(),
            initial_color_dimension: None,
            instructions: default_instructions(),
        }
    }

    #[must_use]
    pub fn with_margin_policy(mut self, policy: MarginPolicy) -> Self {
        self.margin_policy = policy;
        self
    }

    #[must_use]
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }

    #[must_use]
    pub fn with_color_scale(mut self, color_scale: ColorScaleConfig) -> Self {
        self.color_scale = color_scale;
        self
    }

    #[must_use]
    pub fn with_hit_tolerance_px(mut self, tolerance: f64) -> Self {
        self.hit_tolerance_px = tolerance;
        self
    }

    #[must_use]
    pub fn with_tooltip_style(mut self, style: TooltipStyle) -> Self {
        self.tooltip_style = style;
        self
    }

    #[must_use]
    pub fn with_grid_total_width_px(mut self, width: f64) -> Self {
        self.grid_total_width_px = width;
        self
    }

    /// Dimension the lines are colored by at session start.
    #[must_use]
    pub fn with_initial_color_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.initial_color_dimension = Some(dimension.into());
        self
    }

    #[must_use]
    pub fn with_instructions(mut self, instructions: Option<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;
        for (name, value) in [
            ("margin_policy.top_px", self.margin_policy.top_px),
            ("margin_policy.right_px", self.margin_policy.right_px),
            ("margin_policy.bottom_px", self.margin_policy.bottom_px),
            (
                "margin_policy.left_px_per_label_char",
                self.margin_policy.left_px_per_label_char,
            ),
            ("hit_tolerance_px", self.hit_tolerance_px),
            ("tooltip_style.padding_px", self.tooltip_style.padding_px),
            ("tooltip_style.char_width_px", self.tooltip_style.char_width_px),
            (
                "tooltip_style.corner_radius_px",
                self.tooltip_style.corner_radius_px,
            ),
            ("grid_total_width_px", self.grid_total_width_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("line_style.stroke_width_px", self.line_style.stroke_width_px),
            (
                "line_style.highlight_stroke_width_px",
                self.line_style.highlight_stroke_width_px,
            ),
            ("axis_style.stroke_width_px", self.axis_style.stroke_width_px),
            ("axis_style.label_font_size_px", self.axis_style.label_font_size_px),
            ("axis_style.tick_font_size_px", self.axis_style.tick_font_size_px),
            ("tooltip_style.font_size_px", self.tooltip_style.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        for alpha in [self.line_style.alpha, self.line_style.faded_alpha] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(ChartError::InvalidData(
                    "line style alpha values must be in [0, 1]".to_owned(),
                ));
            }
        }
        for color in [
            self.color_scale.start,
            self.color_scale.end,
            self.color_scale.missing,
            self.axis_style.color,
            self.axis_style.brush_fill,
            self.tooltip_style.fill,
            self.tooltip_style.text_color,
            self.grid_highlight.color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

fn default_hit_tolerance_px() -> f64 {
    DEFAULT_HIT_TOLERANCE_PX
}

fn default_grid_total_width_px() -> f64 {
    DEFAULT_GRID_TOTAL_WIDTH_PX
}

fn default_instructions() -> Option<String> {
    Some(DEFAULT_INSTRUCTIONS.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_INSTRUCTIONS, ParcoordsConfig};
    use crate::core::Viewport;

    #[test]
    fn config_json_fills_defaults() {
        let config: ParcoordsConfig =
            serde_json::from_str(r#"{"viewport":{"width":800,"height":400}}"#).expect("config");
        assert_eq!(config, ParcoordsConfig::new(Viewport::new(800, 400)));
        assert_eq!(config.instructions.as_deref(), Some(DEFAULT_INSTRUCTIONS));
        assert_eq!(config.hit_tolerance_px, 2.0);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = ParcoordsConfig::new(Viewport::new(800, 400)).with_hit_tolerance_px(-1.0);
        assert!(config.validate().is_err());
    }
}
