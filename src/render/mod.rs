mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{RenderFrame, TooltipLayer};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FontWeight, LinePrimitive, PolylinePrimitive, RectPrimitive, TextDecoration,
    TextHAlign, TextPrimitive,
};
pub use svg_renderer::SvgRenderer;
pub(crate) use svg_renderer::escape_markup;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code never
/// sees datasets, brushes or selection state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
