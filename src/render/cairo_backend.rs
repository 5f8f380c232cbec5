use cairo::{Context, Format, ImageSurface};
use pango::{FontDescription, Weight};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FontWeight, RectPrimitive, RenderFrame, Renderer, TextDecoration, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polylines_drawn: usize,
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Offscreen Cairo + Pango rasterizer for chart frames.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the surface as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to write png: {err}")))
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        set_color(context, self.background);
        context
            .paint()
            .map_err(|err| backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            fill_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }

        for polyline in &frame.polylines {
            let mut points = polyline.points.iter();
            let Some(first) = points.next() else {
                continue;
            };
            context.move_to(first.x, first.y);
            for point in points {
                context.line_to(point.x, point.y);
            }
            set_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context
                .stroke()
                .map_err(|err| backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for line in &frame.lines {
            context.move_to(line.from.x, line.from.y);
            context.line_to(line.to.x, line.to.y);
            set_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context
                .stroke()
                .map_err(|err| backend_error("failed to stroke axis", err))?;
            stats.lines_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        for rect in &frame.tooltips.rects {
            fill_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }
        for text in &frame.tooltips.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| backend_error("failed to create cairo context", err))?;
        self.draw(&context, frame)
    }
}

fn set_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_rect(context: &Context, rect: RectPrimitive) -> ChartResult<()> {
    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    if radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
    } else {
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);
        context.new_sub_path();
        context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
        context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
        context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
        context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
        context.close_path();
    }
    set_color(context, rect.fill_color);
    context
        .fill()
        .map_err(|err| backend_error("failed to fill rectangle", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    if text.weight == FontWeight::Bold {
        font.set_weight(Weight::Bold);
    }
    layout.set_font_description(Some(&font));
    layout.set_text(&text.text);

    let (width, _) = layout.pixel_size();
    let width = f64::from(width);
    let left = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - width / 2.0,
        TextHAlign::Right => text.x - width,
    };
    // Pango positions layouts by their top edge; frame text uses baselines.
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let top = text.y - baseline;

    set_color(context, text.color);
    context.move_to(left, top);
    pangocairo::functions::show_layout(context, &layout);

    if text.decoration == TextDecoration::Overline {
        context.move_to(left, top);
        context.line_to(left + width, top);
        context.set_line_width(1.0);
        context
            .stroke()
            .map_err(|err| backend_error("failed to stroke overline", err))?;
    }
    Ok(())
}

fn backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
