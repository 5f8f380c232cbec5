use crate::core::{AxisScale, CellValue, PixelPoint};
use crate::error::ChartResult;
use crate::render::{
    FontWeight, LinePrimitive, PolylinePrimitive, RectPrimitive, RenderFrame, TextDecoration,
    TextHAlign, TextPrimitive, TooltipLayer,
};

use super::{CentroidSource, ChartAdapter, ParcoordsConfig, Tooltip};

const AXIS_LABEL_GAP_PX: f64 = 8.0;
const TICK_LABEL_GAP_PX: f64 = 4.0;
const INSTRUCTIONS_BASELINE_OFFSET_PX: f64 = 5.0;

/// Materializes the chart scene from adapter state plus the tooltip overlay.
pub(super) struct FrameBuilder<'a> {
    adapter: &'a ChartAdapter,
    config: &'a ParcoordsConfig,
    tooltips: &'a [Tooltip],
}

impl<'a> FrameBuilder<'a> {
    pub(super) fn new(
        adapter: &'a ChartAdapter,
        config: &'a ParcoordsConfig,
        tooltips: &'a [Tooltip],
    ) -> Self {
        Self {
            adapter,
            config,
            tooltips,
        }
    }

    pub(super) fn build(&self) -> ChartResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.adapter.viewport());
        self.push_brushes(&mut frame);
        self.push_lines(&mut frame)?;
        self.push_axes(&mut frame);
        self.push_instructions(&mut frame);
        frame.tooltips = self.tooltip_layer();
        Ok(frame)
    }

    fn push_brushes(&self, frame: &mut RenderFrame) {
        let margins = self.adapter.margins();
        let style = self.config.axis_style;
        for (dimension, extent) in self.adapter.brushes() {
            let Some(axis) = self.adapter.axis(dimension) else {
                continue;
            };
            frame.rects.push(RectPrimitive::new(
                margins.left + axis.x_px() - style.brush_width_px / 2.0,
                margins.top + extent.start_px,
                style.brush_width_px,
                extent.end_px - extent.start_px,
                style.brush_fill,
            ));
        }
    }

    fn push_lines(&self, frame: &mut RenderFrame) -> ChartResult<()> {
        let style = self.config.line_style;
        let highlighted = self.adapter.highlighted();
        let mut emphasized = Vec::new();

        for row in self.adapter.active_rows()? {
            let points = self.adapter.centroids(row)?;
            let color = self.adapter.line_color(row)?;
            if highlighted.is_empty() {
                frame.polylines.push(PolylinePrimitive::new(
                    points,
                    style.stroke_width_px,
                    color.with_alpha(style.alpha),
                ));
            } else if highlighted.contains(&row) {
                emphasized.push(PolylinePrimitive::new(
                    points,
                    style.highlight_stroke_width_px,
                    color.with_alpha(1.0),
                ));
            } else {
                frame.polylines.push(PolylinePrimitive::new(
                    points,
                    style.stroke_width_px,
                    color.with_alpha(style.faded_alpha),
                ));
            }
        }

        frame.polylines.extend(emphasized);
        Ok(())
    }

    fn push_axes(&self, frame: &mut RenderFrame) {
        let margins = self.adapter.margins();
        let style = self.config.axis_style;
        let top = margins.top;
        let bottom = margins.top + self.adapter.inner_height();

        for axis in self.adapter.axes() {
            let x = margins.left + axis.x_px();
            frame.lines.push(LinePrimitive::new(
                PixelPoint::new(x, top),
                PixelPoint::new(x, bottom),
                style.stroke_width_px,
                style.color,
            ));

            if !axis.dimension().is_empty() {
                let weight = if self.adapter.bold_dimension() == Some(axis.dimension()) {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                };
                frame.texts.push(
                    TextPrimitive::new(
                        axis.dimension(),
                        x,
                        top - AXIS_LABEL_GAP_PX,
                        style.label_font_size_px,
                        style.color,
                        TextHAlign::Center,
                    )
                    .with_weight(weight),
                );
            }

            let ticks: Vec<(String, f64)> = match axis.scale() {
                AxisScale::Linear(scale) => {
                    let (min, max) = scale.domain();
                    vec![
                        (CellValue::Number(min).label(), scale.map(min)),
                        (CellValue::Number(max).label(), scale.map(max)),
                    ]
                }
                AxisScale::Point(scale) => scale
                    .labels()
                    .iter()
                    .filter_map(|label| Some((label.clone(), scale.map(label)?)))
                    .collect(),
            };
            for (label, y) in ticks {
                if label.is_empty() {
                    continue;
                }
                frame.texts.push(TextPrimitive::new(
                    label,
                    x + TICK_LABEL_GAP_PX,
                    top + y,
                    style.tick_font_size_px,
                    style.color,
                    TextHAlign::Left,
                ));
            }
        }
    }

    fn push_instructions(&self, frame: &mut RenderFrame) {
        let Some(instructions) = self.config.instructions.as_deref() else {
            return;
        };
        if instructions.is_empty() {
            return;
        }
        let viewport = self.adapter.viewport();
        frame.texts.push(
            TextPrimitive::new(
                instructions,
                f64::from(viewport.width) / 2.0,
                f64::from(viewport.height) - INSTRUCTIONS_BASELINE_OFFSET_PX,
                self.config.axis_style.tick_font_size_px,
                self.config.axis_style.color,
                TextHAlign::Center,
            )
            .with_decoration(TextDecoration::Overline),
        );
    }

    fn tooltip_layer(&self) -> TooltipLayer {
        let margins = self.adapter.margins();
        let style = self.config.tooltip_style;
        let mut layer = TooltipLayer::default();
        for tooltip in self.tooltips.iter().filter(|tooltip| !tooltip.text.is_empty()) {
            layer.rects.push(
                RectPrimitive::new(
                    margins.left + tooltip.x,
                    margins.top + tooltip.y,
                    tooltip.width,
                    tooltip.height,
                    style.fill,
                )
                .with_corner_radius(style.corner_radius_px),
            );
            layer.texts.push(TextPrimitive::new(
                tooltip.text.clone(),
                margins.left + tooltip.anchor.x,
                margins.top + tooltip.anchor.y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
        layer
    }
}
