use std::collections::HashSet;

use crate::foundation::core::Length;
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::scene::model::{
    BackgroundLayer, Card, CustomLayer, CustomRenderer, EdgeOffsets, FocalAlign, FocalConfig,
    ImageLayer, Layer, LayerSize, Scene, ScrollConfig, Section, ZoneSource,
};

/// Builder for [`Scene`](crate::Scene).
#[derive(Debug, Default)]
pub struct SceneBuilder {
    sections: Vec<Section>,
    ids: HashSet<String>,
}

impl SceneBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section; ids must be unique.
    pub fn section(mut self, section: SectionBuilder) -> ScrollyteResult<Self> {
        let section = section.finish();
        if !self.ids.insert(section.id.clone()) {
            return Err(ScrollyteError::validation(format!(
                "duplicate section id '{}'",
                section.id
            )));
        }
        self.sections.push(section);
        Ok(self)
    }

    /// Build and validate the final [`Scene`](crate::Scene).
    pub fn build(self) -> ScrollyteResult<Scene> {
        let scene = Scene {
            sections: self.sections,
        };
        scene.validate()?;
        Ok(scene)
    }
}

/// Builder for one [`Section`](crate::Section).
#[derive(Debug)]
pub struct SectionBuilder {
    section: Section,
}

impl SectionBuilder {
    /// Start a section with its id and focal text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section: Section {
                id: id.into(),
                focal: FocalConfig {
                    text: text.into(),
                    align: FocalAlign::Center,
                    font_size: None,
                },
                layers: Vec::new(),
                cards: Vec::new(),
                scroll: ScrollConfig::default(),
            },
        }
    }

    /// Set focal text alignment.
    pub fn align(mut self, align: FocalAlign) -> Self {
        self.section.focal.align = align;
        self
    }

    /// Override the focal font-size expression.
    pub fn font_size(mut self, expr: impl Into<String>) -> Self {
        self.section.focal.font_size = Some(expr.into());
        self
    }

    /// Append a decorative layer.
    pub fn layer(mut self, layer: Layer) -> Self {
        self.section.layers.push(layer);
        self
    }

    /// Append a sequenced card.
    pub fn card(mut self, text: impl Into<String>) -> Self {
        self.section.cards.push(Card { text: text.into() });
        self
    }

    /// Pin the section's scroll height instead of deriving it.
    pub fn height_vh(mut self, height: u32) -> Self {
        self.section.scroll.height_vh = Some(height);
        self
    }

    /// Use a viewport-fraction fade zone (see [`ZoneSource::Proportional`]).
    pub fn proportional_zones(mut self, fade_zone: Option<f64>) -> Self {
        self.section.scroll.zones = ZoneSource::Proportional;
        self.section.scroll.fade_zone = fade_zone;
        self
    }

    /// Set the zone source directly.
    pub fn zones(mut self, zones: ZoneSource) -> Self {
        self.section.scroll.zones = zones;
        self
    }

    fn finish(self) -> Section {
        self.section
    }
}

/// Background layer at `depth` with an optional fill.
pub fn background_layer(depth: i32, fill: Option<&str>) -> Layer {
    Layer::Background(BackgroundLayer {
        depth,
        fill: fill.map(str::to_owned),
    })
}

/// Image layer pinned by its top/left offsets with an explicit size.
pub fn image_layer(
    depth: i32,
    src: impl Into<String>,
    top: Length,
    left: Length,
    width: Length,
    height: Length,
) -> Layer {
    Layer::Image(ImageLayer {
        depth,
        src: src.into(),
        position: Some(EdgeOffsets {
            top: Some(top),
            left: Some(left),
            ..EdgeOffsets::default()
        }),
        size: Some(LayerSize {
            width: Some(width),
            height: Some(height),
        }),
    })
}

/// Custom-rendered layer with an opaque config blob.
pub fn custom_layer(depth: i32, renderer: CustomRenderer, config: serde_json::Value) -> Layer {
    Layer::Custom(CustomLayer {
        depth,
        renderer,
        config,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dsl.rs"]
mod tests;
