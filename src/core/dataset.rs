use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One table cell. JSON numbers become `Number`, JSON strings become `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Numeric reading with `parseFloat` semantics: text contributes its
    /// longest leading numeric prefix, or NaN when there is none.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => parse_float_prefix(text),
        }
    }

    /// Numeric reading that only accepts cells which are entirely numeric.
    #[must_use]
    pub fn strict_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Text shown in tooltips and grid cells.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(value) if value.is_nan() => "NaN".to_owned(),
            Self::Number(value) if value.is_infinite() => {
                if *value > 0.0 {
                    "Infinity".to_owned()
                } else {
                    "-Infinity".to_owned()
                }
            }
            Self::Number(value) => number_label(*value),
        }
    }
}

/// Shortest round-trip digits, switching to exponent form outside
/// `[1e-6, 1e21)` the way browsers print numbers.
fn number_label(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => scientific,
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Ordered column-name to value mapping.
pub type Row = IndexMap<String, CellValue>;

/// Stable row identifier: the row's index in the full dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl RowId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Full dataset with a uniform, ordered column set.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl DataSet {
    /// Builds a dataset, requiring every row to carry the first row's columns
    /// in the same order.
    pub fn new(rows: Vec<Row>) -> ChartResult<Self> {
        let columns: Vec<String> = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() || !row.keys().zip(&columns).all(|(a, b)| a == b) {
                return Err(ChartError::InvalidData(format!(
                    "row {index} does not match the column set of row 0"
                )));
            }
        }

        Ok(Self { columns, rows })
    }

    /// Parses a JSON array of flat row objects.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let rows: Vec<Row> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse json rows: {e}")))?;
        Self::new(rows)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        (0..self.rows.len()).map(RowId)
    }

    pub fn row(&self, id: RowId) -> ChartResult<&Row> {
        self.rows.get(id.0).ok_or(ChartError::RowOutOfRange {
            row: id.0,
            len: self.rows.len(),
        })
    }

    pub fn column_index(&self, dimension: &str) -> ChartResult<usize> {
        self.columns
            .iter()
            .position(|column| column == dimension)
            .ok_or_else(|| ChartError::UnknownDimension(dimension.to_owned()))
    }

    /// Value at `(row, column)`; the column index follows `columns()` order.
    pub fn value_at(&self, id: RowId, column: usize) -> ChartResult<&CellValue> {
        let row = self.row(id)?;
        row.get_index(column)
            .map(|(_, value)| value)
            .ok_or_else(|| ChartError::InvalidData(format!("column index {column} out of range")))
    }

    pub fn value(&self, id: RowId, dimension: &str) -> ChartResult<&CellValue> {
        let column = self.column_index(dimension)?;
        self.value_at(id, column)
    }

    /// Numeric readings of one dimension across the full dataset, in row order.
    pub fn numeric_values(&self, dimension: &str) -> ChartResult<Vec<f64>> {
        let column = self.column_index(dimension)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get_index(column).map_or(f64::NAN, |(_, v)| v.as_number()))
            .collect())
    }

    /// Min/max of the finite numeric readings of one dimension.
    ///
    /// Returns `None` when no cell reads as a finite number.
    pub fn numeric_extent(&self, dimension: &str) -> ChartResult<Option<(f64, f64)>> {
        let values = self.numeric_values(dimension)?;
        let finite = || values.iter().copied().filter(|v| v.is_finite()).map(OrderedFloat);
        Ok(match (finite().min(), finite().max()) {
            (Some(min), Some(max)) => Some((min.0, max.0)),
            _ => None,
        })
    }

    /// `true` when every cell of the column is entirely numeric.
    #[must_use]
    pub fn is_numeric_column(&self, column: usize) -> bool {
        self.rows.iter().all(|row| {
            row.get_index(column)
                .and_then(|(_, value)| value.strict_number())
                .is_some()
        })
    }

    /// Character count of the longest label in the first column.
    #[must_use]
    pub fn first_column_label_chars(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.get_index(0))
            .map(|(_, value)| value.label().chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Reads the longest leading float literal of `text`, NaN when there is none.
#[must_use]
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if trimmed[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}
