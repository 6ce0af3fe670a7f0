use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Length, Vh};
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::schema::validate::{SchemaReport, validate_schema};
use crate::timing::calculus::check_declared_height;
use crate::timing::constants::TimingConstants;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete scroll story: an ordered list of fullscreen sections.
///
/// A scene is a pure data model that can be:
/// - built programmatically (see [`crate::SceneBuilder`])
/// - loaded from JSON via [`Scene::from_path`] / [`Scene::from_reader`]
///
/// Loading validates the raw JSON first so every structural defect is reported at once.
pub struct Scene {
    /// Sections in scroll order.
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One fullscreen panel with a focal text zone and decorative layers.
pub struct Section {
    /// Unique, non-empty identifier; also the visual state store key.
    pub id: String,
    /// Focal text rendered at [`crate::FOCAL_DEPTH`].
    pub focal: FocalConfig,
    /// Decorative layers in declaration order.
    pub layers: Vec<Layer>,
    /// Sequenced cards revealed one after another while the section is held.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    /// Scroll geometry.
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Section {
    /// Number of sequenced cards.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Headline text pinned to the viewport center.
pub struct FocalConfig {
    /// Text content; `\n` starts a new line.
    pub text: String,
    /// Horizontal text alignment.
    #[serde(default)]
    pub align: FocalAlign,
    /// Font-size override: a length (`48px`, `3rem`) or `clamp(min, preferred, max)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

impl FocalConfig {
    /// Number of rendered lines before wrapping (explicit line breaks + 1).
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal alignment of the focal text.
pub enum FocalAlign {
    /// Centered (default).
    #[default]
    Center,
    /// Left aligned.
    Left,
    /// Right aligned.
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A sequenced content element inside a section.
pub struct Card {
    /// Card text.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A decorative layer painted beneath the focal zone.
pub enum Layer {
    /// Full-bleed fill.
    Background(BackgroundLayer),
    /// Positioned raster/vector image.
    Image(ImageLayer),
    /// Widget drawn by a registered custom renderer.
    Custom(CustomLayer),
}

impl Layer {
    /// Paint depth; always within `[0, 50]` for a validated scene.
    pub fn depth(&self) -> i32 {
        match self {
            Self::Background(l) => l.depth,
            Self::Image(l) => l.depth,
            Self::Custom(l) => l.depth,
        }
    }

    /// Short variant name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::Image(_) => "image",
            Self::Custom(_) => "custom",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Background fill layer.
pub struct BackgroundLayer {
    /// Paint depth in `[0, 50]`.
    pub depth: i32,
    /// Color or gradient handed to the renderer verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Image layer, optionally pinned with edge offsets.
pub struct ImageLayer {
    /// Paint depth in `[0, 50]`.
    pub depth: i32,
    /// Image source reference.
    pub src: String,
    /// Edge offsets; layers without a position are not overlap-checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<EdgeOffsets>,
    /// Optional explicit size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<LayerSize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Edge offsets relative to the viewport.
pub struct EdgeOffsets {
    /// Offset from the top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    /// Offset from the right edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    /// Offset from the bottom edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
    /// Offset from the left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declared layer size.
pub struct LayerSize {
    /// Width (percentages refer to viewport width).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    /// Height (percentages refer to viewport height).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Layer drawn by a custom renderer; never geometrically overlap-checked.
pub struct CustomLayer {
    /// Paint depth in `[0, 50]`.
    pub depth: i32,
    /// Renderer that draws this layer.
    pub renderer: CustomRenderer,
    /// Renderer-specific configuration, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub config: serde_json::Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Closed set of custom renderers the renderer dispatch knows how to draw.
pub enum CustomRenderer {
    /// Drifting particle field.
    ParticleField,
    /// Animated gradient mesh.
    GradientMesh,
    /// Parallax starfield.
    Starfield,
    /// Audio-style waveform strip.
    Waveform,
}

impl CustomRenderer {
    /// Every known renderer.
    pub const ALL: [CustomRenderer; 4] = [
        Self::ParticleField,
        Self::GradientMesh,
        Self::Starfield,
        Self::Waveform,
    ];

    /// Stable key used in scene JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::ParticleField => "particle_field",
            Self::GradientMesh => "gradient_mesh",
            Self::Starfield => "starfield",
            Self::Waveform => "waveform",
        }
    }

    /// Look up a renderer by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scroll geometry of a section.
pub struct ScrollConfig {
    /// Total scroll height in vh; derived by [`Scene::resolve_scroll_heights`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_vh: Option<u32>,
    /// Fade zone as a fraction of viewport height, for [`ZoneSource::Proportional`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_zone: Option<f64>,
    /// Where the hold/fade zones come from.
    #[serde(default)]
    pub zones: ZoneSource,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Source of a section's hold and fade zones.
pub enum ZoneSource {
    /// Derived from reading time and card count by the timing calculus.
    #[default]
    Calculated,
    /// Fade zone is a viewport fraction; hold zone is a fixed share of it.
    Proportional,
    /// Section-specific override; must keep `hold < fade`.
    Fixed {
        /// Hold zone.
        hold: Vh,
        /// Fade zone.
        fade: Vh,
    },
}

impl Scene {
    /// Parse and validate a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollyteResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| ScrollyteError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollyteResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| ScrollyteError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Parse and validate a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollyteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollyteError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate raw JSON, then deserialize it.
    pub fn from_value(value: serde_json::Value) -> ScrollyteResult<Self> {
        validate_schema(&value).into_result()?;
        serde_json::from_value(value)
            .map_err(|e| ScrollyteError::serde(format!("decode scene: {e}")))
    }

    /// Run the schema validator over this scene.
    pub fn schema_report(&self) -> ScrollyteResult<SchemaReport> {
        let value = serde_json::to_value(self)
            .map_err(|e| ScrollyteError::serde(format!("encode scene: {e}")))?;
        Ok(validate_schema(&value))
    }

    /// Validate scene invariants; the error lists every defect found.
    pub fn validate(&self) -> ScrollyteResult<()> {
        self.schema_report()?.into_result()
    }

    /// Look up a section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Write derived scroll heights into every section that doesn't declare one.
    ///
    /// Declared heights are kept but must still cover the section's fade zone.
    ///
    /// `default_fraction` feeds proportional zones without their own `fade_zone`.
    pub fn resolve_scroll_heights(
        &mut self,
        timing: &TimingConstants,
        default_fraction: f64,
    ) -> ScrollyteResult<()> {
        let last = self.sections.len().saturating_sub(1);
        for (i, section) in self.sections.iter_mut().enumerate() {
            let (_, fade) =
                timing.zone_bounds_vh(&section.scroll, section.card_count(), default_fraction)?;
            if let Some(height) = section.scroll.height_vh {
                check_declared_height(height, fade).map_err(|e| {
                    ScrollyteError::validation(format!("section '{}': {e}", section.id))
                })?;
                continue;
            }
            let height = timing.section_scroll_height(section.card_count(), i == last, fade);
            tracing::debug!(section = %section.id, height_vh = height, "derived scroll height");
            section.scroll.height_vh = Some(height);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
