use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartResult;
use crate::render::Color;

use super::{ChartAdapter, ColorScaleConfig};

/// Two-stop continuous color scale.
///
/// Values are clamped into the domain; NaN, or a scale without a domain,
/// yields the `missing` color. A zero-width domain maps to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    start: Color,
    end: Color,
    missing: Color,
    domain: Option<(f64, f64)>,
}

impl ColorScale {
    #[must_use]
    pub fn new(config: ColorScaleConfig) -> Self {
        Self {
            start: config.start,
            end: config.end,
            missing: config.missing,
            domain: None,
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Option<(f64, f64)>) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn domain(self) -> Option<(f64, f64)> {
        self.domain
    }

    #[must_use]
    pub fn start(self) -> Color {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Color {
        self.end
    }

    #[must_use]
    pub fn missing(self) -> Color {
        self.missing
    }

    #[must_use]
    pub fn map(self, value: f64) -> Color {
        let Some((min, max)) = self.domain else {
            return self.missing;
        };
        if value.is_nan() {
            return self.missing;
        }
        let span = max - min;
        let t = if span == 0.0 {
            0.0
        } else {
            ((value - min) / span).clamp(0.0, 1.0)
        };
        self.start.lerp(self.end, t)
    }
}

impl ChartAdapter {
    /// Recolors every line by `dimension` and bolds that axis label.
    ///
    /// The domain spans the full dataset, not only the brushed rows, so line
    /// colors stay stable while brushing. Returns the scale with its domain.
    pub fn color_by_dimension(&mut self, dimension: &str, scale: ColorScale) -> ChartResult<ColorScale> {
        let scale = scale.with_domain(self.data().numeric_extent(dimension)?);
        let colors = self
            .data()
            .numeric_values(dimension)?
            .into_iter()
            .map(|value| scale.map(value))
            .collect();
        self.set_line_colors(colors)?;
        self.set_bold_dimension(Some(dimension))?;
        debug!(dimension, domain = ?scale.domain(), "recolored lines");
        Ok(scale)
    }
}
