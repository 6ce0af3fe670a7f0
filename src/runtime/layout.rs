use crate::foundation::core::{Vh, Viewport};
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::runtime::controller::{SectionGeometry, TickInput};
use crate::scene::model::Scene;

/// One section's placement in document space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionSpan {
    /// Section id.
    pub id: String,
    /// Document offset of the section's top edge.
    pub top_px: f64,
    /// Section scroll height.
    pub height_px: f64,
}

/// Sections stacked top to bottom at their resolved scroll heights.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ScrollLayout {
    viewport: Viewport,
    spans: Vec<SectionSpan>,
}

impl ScrollLayout {
    /// Stack `scene`'s sections; every section must have a scroll height.
    ///
    /// Call [`Scene::resolve_scroll_heights`] first for scenes that leave heights implicit.
    pub fn new(scene: &Scene, viewport: Viewport) -> ScrollyteResult<Self> {
        let mut spans = Vec::with_capacity(scene.sections.len());
        let mut top = 0.0;
        for section in &scene.sections {
            let Some(height_vh) = section.scroll.height_vh else {
                return Err(ScrollyteError::validation(format!(
                    "section '{}' has no scroll height; resolve scroll heights first",
                    section.id
                )));
            };
            let height_px = Vh(f64::from(height_vh)).to_px(viewport.height);
            spans.push(SectionSpan {
                id: section.id.clone(),
                top_px: top,
                height_px,
            });
            top += height_px;
        }
        Ok(Self { viewport, spans })
    }

    /// Viewport the layout was computed for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Section placements in scroll order.
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    /// Total document height.
    pub fn total_height_px(&self) -> f64 {
        self.spans.last().map_or(0.0, |s| s.top_px + s.height_px)
    }

    /// Largest meaningful scroll offset.
    pub fn max_scroll_px(&self) -> f64 {
        (self.total_height_px() - self.viewport.height).max(0.0)
    }

    /// Section rectangles relative to the viewport top at `scroll_y`.
    pub fn geometry_at(&self, scroll_y: f64) -> Vec<SectionGeometry> {
        self.spans
            .iter()
            .map(|s| SectionGeometry {
                top: s.top_px - scroll_y,
                bottom: s.top_px + s.height_px - scroll_y,
            })
            .collect()
    }

    /// Tick input for `scroll_y` at time `now_ms`.
    pub fn tick_input(&self, scroll_y: f64, now_ms: u64) -> TickInput {
        TickInput {
            viewport: self.viewport,
            sections: self.geometry_at(scroll_y),
            now_ms,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/layout.rs"]
mod tests;
