use std::collections::BTreeMap;
use std::fmt::Write;

use tracing::trace;

use crate::core::{DataSet, RowId};
use crate::error::{ChartError, ChartResult};
use crate::render::escape_markup;

use super::RowStyle;

/// Table view of the rows the chart currently shows.
///
/// Every column gets the same width: `floor(total_width / columns)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    columns: Vec<String>,
    rows: Vec<RowId>,
    cell_width_px: u32,
    styles: BTreeMap<RowId, RowStyle>,
}

impl GridView {
    #[must_use]
    pub fn new(columns: Vec<String>, total_width_px: f64) -> Self {
        let cell_width_px = if columns.is_empty() {
            0
        } else {
            (total_width_px / columns.len() as f64).floor() as u32
        };
        Self {
            columns,
            rows: Vec::new(),
            cell_width_px,
            styles: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn cell_width_px(&self) -> u32 {
        self.cell_width_px
    }

    /// Replaces the displayed rows. Row styles are dropped with the old rows.
    pub fn render_rows(&mut self, rows: Vec<RowId>) {
        trace!(rows = rows.len(), "grid re-rendered");
        self.rows = rows;
        self.styles.clear();
    }

    #[must_use]
    pub fn visible_rows(&self) -> &[RowId] {
        &self.rows
    }

    /// Row shown at `position` (0 = first data row).
    #[must_use]
    pub fn row_at(&self, position: usize) -> Option<RowId> {
        self.rows.get(position).copied()
    }

    #[must_use]
    pub fn position_of(&self, row: RowId) -> Option<usize> {
        self.rows.iter().position(|&visible| visible == row)
    }

    /// Styles the given rows; rows not currently displayed are skipped.
    pub fn apply_highlight(&mut self, rows: &[RowId], style: RowStyle) {
        for &row in rows {
            if self.rows.contains(&row) {
                self.styles.insert(row, style);
            }
        }
    }

    pub fn clear_highlight(&mut self) {
        self.styles.clear();
    }

    #[must_use]
    pub fn row_style(&self, row: RowId) -> Option<RowStyle> {
        self.styles.get(&row).copied()
    }

    #[must_use]
    pub fn styled_rows(&self) -> Vec<RowId> {
        self.styles.keys().copied().collect()
    }

    /// Header plus one `div.row` per displayed row, with fixed-width cells.
    pub fn to_html(&self, dataset: &DataSet) -> ChartResult<String> {
        let mut html = String::new();
        self.write_html(&mut html, dataset)?;
        Ok(html)
    }

    fn write_html(&self, html: &mut String, dataset: &DataSet) -> ChartResult<()> {
        let width = self.cell_width_px;
        html.push_str("<div class=\"header\">");
        for (column, name) in self.columns.iter().enumerate() {
            write!(
                html,
                "<div class=\"cell col-{column}\" style=\"width:{width}px\">{}</div>",
                escape_markup(name)
            )
            .map_err(write_error)?;
        }
        html.push_str("</div>");

        for &row in &self.rows {
            match self.styles.get(&row) {
                Some(style) => {
                    let weight = if style.bold { "bold" } else { "normal" };
                    write!(
                        html,
                        "<div class=\"row\" data-row=\"{}\" style=\"color:{};font-weight:{weight}\">",
                        row.index(),
                        style.color.to_hex()
                    )
                    .map_err(write_error)?;
                }
                None => write!(html, "<div class=\"row\" data-row=\"{}\">", row.index())
                    .map_err(write_error)?,
            }
            for column in 0..self.columns.len() {
                let value = dataset.value_at(row, column)?;
                write!(
                    html,
                    "<div class=\"cell col-{column}\" style=\"width:{width}px\">{}</div>",
                    escape_markup(&value.label())
                )
                .map_err(write_error)?;
            }
            html.push_str("</div>");
        }
        Ok(())
    }
}

fn write_error(err: std::fmt::Error) -> ChartError {
    ChartError::InvalidData(format!("failed to write grid html: {err}"))
}

#[cfg(test)]
mod tests {
    use super::GridView;
    use crate::api::RowStyle;
    use crate::core::RowId;

    #[test]
    fn cell_width_floors_even_share() {
        let grid = GridView::new(vec!["a".into(), "b".into(), "c".into()], 1000.0);
        assert_eq!(grid.cell_width_px(), 333);
        assert_eq!(GridView::new(Vec::new(), 1000.0).cell_width_px(), 0);
    }

    #[test]
    fn highlight_skips_hidden_rows_and_rerender_drops_styles() {
        let mut grid = GridView::new(vec!["a".into()], 100.0);
        grid.render_rows(vec![RowId(0), RowId(2)]);
        grid.apply_highlight(&[RowId(1), RowId(2)], RowStyle::default());
        assert_eq!(grid.styled_rows(), vec![RowId(2)]);
        assert_eq!(grid.row_at(1), Some(RowId(2)));
        assert_eq!(grid.position_of(RowId(2)), Some(1));

        grid.render_rows(vec![RowId(2)]);
        assert!(grid.styled_rows().is_empty());
    }
}
