//! Scrollyte is a render-agnostic choreography engine for scroll-driven panel stories.
//!
//! A story is a [`Scene`]: an ordered list of fullscreen [`Section`]s, each with a protected focal
//! text zone at the viewport center and decorative layers painted beneath it. While the reader
//! scrolls, sections fade in, hold at full opacity and fade out in strict sequence.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: raw scene JSON -> [`SchemaReport`] (structure, depth ceiling, zone ordering)
//! 2. **Check overlap** (advisory): [`Section`] -> [`OverlapReport`] warnings
//! 3. **Derive timing**: [`TimingConstants`] -> scroll heights, card thresholds, [`FadeZones`]
//! 4. **Control**: per scroll tick, [`ScrollController`] writes opacity, state and card phases
//!    into an injected [`VisualStateStore`]; a renderer reads the store
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Depth contract**: focal text paints at [`FOCAL_DEPTH`]; decorative layers stay within
//!   `[MIN_LAYER_DEPTH, MAX_LAYER_DEPTH]`.
//! - **Recompute, don't remember**: every tick derives visibility from geometry; only the card
//!   sequence is sticky.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod overlap;
mod runtime;
mod scene;
mod schema;
mod timing;

pub use foundation::core::{
    BoundingBox, FOCAL_DEPTH, Length, MAX_LAYER_DEPTH, MIN_LAYER_DEPTH, Point, ROOT_FONT_PX, Rect,
    Size, Vh, Viewport,
};
pub use foundation::error::{ScrollyteError, ScrollyteResult};
pub use overlap::detect::{OverlapReport, validate_all_sections, validate_hero_overlap};
pub use overlap::geometry::{
    DEFAULT_FONT_SIZE, OverlapOpts, estimate_font_px, focal_box, image_box,
};
pub use runtime::controller::{
    ControllerOpts, DEFAULT_FADE_ZONE_FRACTION, ScrollController, SectionGeometry, TickInput,
    TickReport, VisibilityEvent, section_opacity, visibility_state,
};
pub use runtime::layout::{ScrollLayout, SectionSpan};
pub use runtime::store::{
    CardPhase, CardVisual, InMemoryVisualStore, SectionVisual, VisibilityState, VisualStateStore,
};
pub use scene::dsl::{SceneBuilder, SectionBuilder, background_layer, custom_layer, image_layer};
pub use scene::model::{
    BackgroundLayer, Card, CustomLayer, CustomRenderer, EdgeOffsets, FocalAlign, FocalConfig,
    ImageLayer, Layer, LayerSize, Scene, ScrollConfig, Section, ZoneSource,
};
pub use schema::validate::{SchemaReport, validate_schema};
pub use timing::calculus::{
    CardThreshold, FadeZones, calculate_card_threshold, calculate_fade_zones,
    calculate_section_height, check_declared_height, height_covers_fade,
};
pub use timing::constants::TimingConstants;
