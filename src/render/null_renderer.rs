use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless sessions.
///
/// Frames are still validated, and primitive counts of the last frame are kept
/// for assertions.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_polyline_count: usize,
    pub last_text_count: usize,
    pub last_tooltip_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_polyline_count = frame.polylines.len();
        self.last_text_count = frame.texts.len();
        self.last_tooltip_count = frame.tooltips.rects.len();
        Ok(())
    }
}
