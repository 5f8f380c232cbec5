use std::fmt::{self, Write};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FontWeight, RenderFrame, Renderer, TextDecoration, TextHAlign, TextPrimitive,
};

/// Renders frames to standalone SVG markup.
///
/// Each `render` call replaces the stored document. Tooltip elements carry
/// `id="tooltip"` so hosts can select and remove them as one group.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut buf = String::new();
        write_document(&mut buf, frame)
            .map_err(|e| ChartError::InvalidData(format!("failed to write svg document: {e}")))?;
        self.document = buf;
        Ok(())
    }
}

fn write_document(buf: &mut String, frame: &RenderFrame) -> fmt::Result {
    let (width, height) = (frame.viewport.width, frame.viewport.height);
    write!(
        buf,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    )?;

    buf.push_str("<g class=\"brushes\">");
    for rect in &frame.rects {
        write!(
            buf,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            r = num(rect.corner_radius),
        )?;
        write_fill(buf, rect.fill_color)?;
        buf.push_str("/>");
    }
    buf.push_str("</g>");

    buf.push_str("<g class=\"foreground\">");
    for polyline in &frame.polylines {
        buf.push_str("<polyline points=\"");
        for (index, point) in polyline.points.iter().enumerate() {
            if index > 0 {
                buf.push(' ');
            }
            write!(buf, "{},{}", num(point.x), num(point.y))?;
        }
        buf.push_str("\" fill=\"none\"");
        write_stroke(buf, polyline.color, polyline.stroke_width)?;
        buf.push_str("/>");
    }
    buf.push_str("</g>");

    buf.push_str("<g class=\"axes\">");
    for line in &frame.lines {
        write!(
            buf,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
            num(line.from.x),
            num(line.from.y),
            num(line.to.x),
            num(line.to.y)
        )?;
        write_stroke(buf, line.color, line.stroke_width)?;
        buf.push_str("/>");
    }
    buf.push_str("</g>");

    buf.push_str("<g class=\"labels\">");
    for text in &frame.texts {
        write_text(buf, text, None)?;
    }
    buf.push_str("</g>");

    for rect in &frame.tooltips.rects {
        write!(
            buf,
            "<rect id=\"tooltip\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"",
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            r = num(rect.corner_radius),
        )?;
        write_fill(buf, rect.fill_color)?;
        buf.push_str("/>");
    }
    for text in &frame.tooltips.texts {
        write_text(buf, text, Some("tooltip"))?;
    }

    buf.push_str("</svg>");
    Ok(())
}

fn write_text(buf: &mut String, text: &TextPrimitive, id: Option<&str>) -> fmt::Result {
    buf.push_str("<text");
    if let Some(id) = id {
        write!(buf, " id=\"{id}\"")?;
    }
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    write!(
        buf,
        " x=\"{}\" y=\"{}\" font-size=\"{}\" text-anchor=\"{anchor}\"",
        num(text.x),
        num(text.y),
        num(text.font_size_px)
    )?;
    if text.weight == FontWeight::Bold {
        buf.push_str(" font-weight=\"bold\"");
    }
    if text.decoration == TextDecoration::Overline {
        buf.push_str(" text-decoration=\"overline\"");
    }
    write_fill(buf, text.color)?;
    write!(buf, ">{}</text>", escape_markup(&text.text))
}

fn write_fill(buf: &mut String, color: Color) -> fmt::Result {
    write!(buf, " fill=\"{}\"", color.to_hex())?;
    if color.alpha < 1.0 {
        write!(buf, " fill-opacity=\"{}\"", num(color.alpha))?;
    }
    Ok(())
}

fn write_stroke(buf: &mut String, color: Color, width: f64) -> fmt::Result {
    write!(
        buf,
        " stroke=\"{}\" stroke-width=\"{}\"",
        color.to_hex(),
        num(width)
    )?;
    if color.alpha < 1.0 {
        write!(buf, " stroke-opacity=\"{}\"", num(color.alpha))?;
    }
    Ok(())
}

/// Two-decimal rendering without trailing zeros.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    rounded.to_string()
}

/// Escapes text for use inside SVG/HTML element content and attributes.
pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
