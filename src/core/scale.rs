use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Linear mapping from a value domain onto a pixel range.
///
/// A degenerate domain (`start == end`) maps every value to the middle of the
/// range, which keeps constant columns drawable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        for value in [domain.0, domain.1, range.0, range.1] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "scale domain and range must be finite".to_owned(),
                ));
            }
        }
        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        if span == 0.0 {
            return 0.5 * (self.range_start + self.range_end);
        }
        let normalized = (value - self.domain_start) / span;
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 || self.domain_end == self.domain_start {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn with_range(self, range_start: f64, range_end: f64) -> Self {
        Self {
            range_start,
            range_end,
            ..self
        }
    }
}

/// Evenly spaced positions for a sorted set of distinct labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointScale {
    labels: Vec<String>,
    range_start: f64,
    range_end: f64,
}

impl PointScale {
    #[must_use]
    pub fn new<I, S>(labels: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        labels.sort();
        labels.dedup();
        Self {
            labels,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Position of `label`, `None` when the label is not part of the domain.
    #[must_use]
    pub fn map(&self, label: &str) -> Option<f64> {
        let index = self
            .labels
            .binary_search_by(|probe| probe.as_str().cmp(label))
            .ok()?;
        Some(self.position(index))
    }

    fn position(&self, index: usize) -> f64 {
        if self.labels.len() < 2 {
            return 0.5 * (self.range_start + self.range_end);
        }
        let step = (self.range_end - self.range_start) / (self.labels.len() - 1) as f64;
        self.range_start + step * index as f64
    }

    #[must_use]
    pub fn with_range(mut self, range_start: f64, range_end: f64) -> Self {
        self.range_start = range_start;
        self.range_end = range_end;
        self
    }
}

/// Vertical scale of one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisScale {
    Linear(LinearScale),
    Point(PointScale),
}

impl AxisScale {
    /// Builds a linear scale over the extent of `values` mapped onto `range`.
    pub fn linear_from_values(values: &[f64], range: (f64, f64)) -> ChartResult<Self> {
        let finite = || values.iter().copied().filter(|v| v.is_finite()).map(OrderedFloat);
        let (Some(min), Some(max)) = (finite().min(), finite().max()) else {
            return Err(ChartError::InvalidData(
                "linear axis needs at least one finite value".to_owned(),
            ));
        };
        Ok(Self::Linear(LinearScale::new((min.0, max.0), range)?))
    }

    #[must_use]
    pub fn with_range(self, range_start: f64, range_end: f64) -> Self {
        match self {
            Self::Linear(scale) => Self::Linear(scale.with_range(range_start, range_end)),
            Self::Point(scale) => Self::Point(scale.with_range(range_start, range_end)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisScale, LinearScale, PointScale};

    #[test]
    fn linear_scale_maps_and_inverts() {
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0)).expect("scale");
        assert_eq!(scale.map(0.0), 200.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(5.0), 100.0);
        assert_eq!(scale.invert(50.0), 7.5);
    }

    #[test]
    fn degenerate_linear_domain_maps_to_middle() {
        let scale = LinearScale::new((3.0, 3.0), (100.0, 0.0)).expect("scale");
        assert_eq!(scale.map(3.0), 50.0);
        assert_eq!(scale.invert(12.0), 3.0);
    }

    #[test]
    fn point_scale_sorts_and_dedups_labels() {
        let scale = PointScale::new(["b", "a", "c", "a"], (100.0, 0.0));
        assert_eq!(scale.labels(), &["a", "b", "c"]);
        assert_eq!(scale.map("a"), Some(100.0));
        assert_eq!(scale.map("b"), Some(50.0));
        assert_eq!(scale.map("z"), None);
        let single = PointScale::new(["only"], (100.0, 0.0));
        assert_eq!(single.map("only"), Some(50.0));
    }

    #[test]
    fn with_range_keeps_domain_and_moves_pixels() {
        let linear = AxisScale::Linear(LinearScale::new((0.0, 10.0), (200.0, 0.0)).expect("scale"))
            .with_range(400.0, 0.0);
        let AxisScale::Linear(linear) = linear else {
            panic!("expected linear scale");
        };
        assert_eq!(linear.domain(), (0.0, 10.0));
        assert_eq!(linear.map(5.0), 200.0);

        let point = AxisScale::Point(PointScale::new(["x", "y"], (100.0, 0.0))).with_range(300.0, 0.0);
        let AxisScale::Point(point) = point else {
            panic!("expected point scale");
        };
        assert_eq!(point.labels(), &["x", "y"]);
        assert_eq!(point.map("x"), Some(300.0));
    }
}
