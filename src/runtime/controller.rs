use smallvec::SmallVec;

use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::foundation::math::{clamp01, linear_falloff, linear_ramp};
use crate::runtime::store::{
    CardPhase, CardVisual, SectionVisual, VisibilityState, VisualStateStore,
};
use crate::scene::model::{Scene, ScrollConfig};
use crate::timing::calculus::{FadeZones, check_declared_height};
use crate::timing::constants::TimingConstants;

/// Fade-zone fraction used by proportional sections that don't declare one.
pub const DEFAULT_FADE_ZONE_FRACTION: f64 = 0.6;

/// Controller configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ControllerOpts {
    /// Viewport fraction for proportional fade zones without a section override.
    pub default_fade_zone_fraction: f64,
    /// Timing table every zone and threshold derives from.
    pub timing: TimingConstants,
}

impl Default for ControllerOpts {
    fn default() -> Self {
        Self {
            default_fade_zone_fraction: DEFAULT_FADE_ZONE_FRACTION,
            timing: TimingConstants::default(),
        }
    }
}

impl ControllerOpts {
    /// Validate the timing table and default fraction.
    pub fn validate(&self) -> ScrollyteResult<()> {
        self.timing.validate()?;
        let f = self.default_fade_zone_fraction;
        if !f.is_finite() || f <= 0.0 {
            return Err(ScrollyteError::validation(format!(
                "default_fade_zone_fraction must be finite and > 0 (got {f})"
            )));
        }
        Ok(())
    }
}

/// A section's rectangle relative to the viewport top, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionGeometry {
    /// Top edge (negative once scrolled above the viewport).
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl SectionGeometry {
    fn center(self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    fn is_on_screen(self, viewport_height: f64) -> bool {
        self.bottom > 0.0 && self.top < viewport_height
    }
}

/// Everything one tick reads: viewport, per-section geometry in scene order, and a clock.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickInput {
    /// Current viewport.
    pub viewport: Viewport,
    /// One rectangle per scene section, in scene order.
    pub sections: Vec<SectionGeometry>,
    /// Monotonic timestamp in milliseconds, used for card exit scheduling.
    pub now_ms: u64,
}

/// Side effect emitted by the card sequence during a tick.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VisibilityEvent {
    /// Card reveal animation triggered; its exit is scheduled.
    CardRevealed {
        /// Section id.
        section: String,
        /// Card index.
        card: usize,
        /// Time at which the exit transition starts.
        exit_at_ms: u64,
    },
    /// Card exit transition started.
    CardExitStarted {
        /// Section id.
        section: String,
        /// Card index.
        card: usize,
    },
    /// Section scrolled back out before its half-opacity point; its sequence can replay.
    CardsReset {
        /// Section id.
        section: String,
    },
}

/// Events produced by one tick, in emission order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TickReport {
    /// Emitted events.
    pub events: Vec<VisibilityEvent>,
}

/// Opacity at `distance` from the viewport center.
///
/// `1` inside the hold zone, linear falloff across the fade band, `0` from the fade zone on.
pub fn section_opacity(distance: f64, zones: &FadeZones) -> f64 {
    linear_falloff(
        distance.abs(),
        zones.hold_zone_px(),
        zones.fade_zone_px(),
    )
}

/// State and opacity for a painted section whose center sits `signed_distance` below the
/// viewport center (negative once it has passed the center).
pub fn visibility_state(signed_distance: f64, zones: &FadeZones) -> (VisibilityState, f64) {
    let distance = signed_distance.abs();
    let opacity = section_opacity(distance, zones);
    let state = if distance < zones.hold_zone_px() {
        VisibilityState::Held
    } else if distance >= zones.fade_zone_px() {
        VisibilityState::Hidden
    } else if signed_distance > 0.0 {
        VisibilityState::FadingIn
    } else {
        VisibilityState::FadingOut
    };
    (state, opacity)
}

#[derive(Clone, Copy, Debug, Default)]
struct CardTrack {
    phase: CardPhase,
    exit_at_ms: u64,
}

#[derive(Clone, Debug)]
struct SectionTrack {
    id: String,
    scroll: ScrollConfig,
    // Sticky: set the first tick the section is fully opaque, cleared on reset.
    reached_full: bool,
    cards: Vec<CardTrack>,
}

impl SectionTrack {
    fn is_pristine(&self) -> bool {
        !self.reached_full && self.cards.iter().all(|c| c.phase == CardPhase::Pending)
    }
}

#[derive(Clone, Copy, Debug)]
struct SectionRead {
    zones: FadeZones,
    signed_distance: f64,
    state: VisibilityState,
    opacity: f64,
    painted: bool,
}

/// Runtime visibility controller.
///
/// Recomputes every section's state from geometry on each tick. The only state carried between
/// ticks is the card sequence of each section.
#[derive(Clone, Debug)]
pub struct ScrollController {
    opts: ControllerOpts,
    tracks: Vec<SectionTrack>,
}

impl ScrollController {
    /// Validate `scene` and `opts` and prepare per-section tracking.
    ///
    /// Fails if any section's zones would violate `hold < fade`, or if a declared scroll height
    /// is too short for the section to finish fading out while on screen.
    #[tracing::instrument(skip(scene, opts), fields(sections = scene.sections.len()))]
    pub fn setup(scene: &Scene, opts: ControllerOpts) -> ScrollyteResult<Self> {
        opts.validate()?;
        scene.validate()?;

        let mut tracks = Vec::with_capacity(scene.sections.len());
        for section in &scene.sections {
            let in_section = |e: ScrollyteError| {
                ScrollyteError::validation(format!("section '{}': {e}", section.id))
            };
            let (_, fade) = opts
                .timing
                .zone_bounds_vh(
                    &section.scroll,
                    section.card_count(),
                    opts.default_fade_zone_fraction,
                )
                .map_err(in_section)?;
            if let Some(height) = section.scroll.height_vh {
                check_declared_height(height, fade).map_err(in_section)?;
            }
            tracks.push(SectionTrack {
                id: section.id.clone(),
                scroll: section.scroll,
                reached_full: false,
                cards: vec![CardTrack::default(); section.card_count()],
            });
        }
        tracing::debug!(sections = tracks.len(), "scroll controller ready");
        Ok(Self { opts, tracks })
    }

    /// Apply the initial tick at page load.
    pub fn on_load(
        &mut self,
        input: &TickInput,
        store: &mut impl VisualStateStore,
    ) -> ScrollyteResult<TickReport> {
        tracing::debug!(now_ms = input.now_ms, "initial visibility pass");
        self.tick(input, store)
    }

    /// Apply one scroll tick.
    pub fn on_scroll(
        &mut self,
        input: &TickInput,
        store: &mut impl VisualStateStore,
    ) -> ScrollyteResult<TickReport> {
        self.tick(input, store)
    }

    #[tracing::instrument(level = "trace", skip_all, fields(now_ms = input.now_ms))]
    fn tick(
        &mut self,
        input: &TickInput,
        store: &mut impl VisualStateStore,
    ) -> ScrollyteResult<TickReport> {
        let vp = input.viewport;
        if !vp.height.is_finite() || vp.height <= 0.0 {
            return Err(ScrollyteError::runtime("viewport height must be > 0"));
        }
        if input.sections.len() != self.tracks.len() {
            return Err(ScrollyteError::runtime(format!(
                "tick has geometry for {} sections, scene has {}",
                input.sections.len(),
                self.tracks.len()
            )));
        }

        // Reads for every section happen before any write.
        let reads = self.read_sections(input)?;
        let trailing = self.trailing_opacity(input);

        let mut report = TickReport::default();
        for (i, read) in reads.iter().enumerate() {
            let cards = self.advance_cards(i, read, input, &mut report);
            let track = &self.tracks[i];
            store.write_section(
                &track.id,
                SectionVisual {
                    state: read.state,
                    opacity: read.opacity,
                    painted: read.painted,
                    cards,
                },
            );
        }
        store.write_trailing(trailing);

        Ok(report)
    }

    fn read_sections(&self, input: &TickInput) -> ScrollyteResult<Vec<SectionRead>> {
        let vp = input.viewport;
        let center_y = vp.height / 2.0;
        let mut reads = Vec::with_capacity(self.tracks.len());
        for (track, geom) in self.tracks.iter().zip(&input.sections) {
            let zones = self.opts.timing.resolve_zones(
                &track.scroll,
                track.cards.len(),
                vp.height,
                self.opts.default_fade_zone_fraction,
            )?;
            let signed_distance = geom.center() - center_y;
            let painted = geom.is_on_screen(vp.height);
            let (state, opacity) = if painted {
                visibility_state(signed_distance, &zones)
            } else {
                (VisibilityState::Hidden, 0.0)
            };
            reads.push(SectionRead {
                zones,
                signed_distance,
                state,
                opacity,
                painted,
            });
        }
        Ok(reads)
    }

    fn trailing_opacity(&self, input: &TickInput) -> f64 {
        let Some(last) = input.sections.last() else {
            return 0.0;
        };
        let vp = input.viewport;
        let risen = vp.height / 2.0 - last.bottom;
        let span = self.opts.timing.trailing_fade.to_px(vp.height);
        if risen <= 0.0 {
            return 0.0;
        }
        clamp01(linear_ramp(risen, 0.0, span))
    }

    fn advance_cards(
        &mut self,
        index: usize,
        read: &SectionRead,
        input: &TickInput,
        report: &mut TickReport,
    ) -> SmallVec<[CardVisual; 4]> {
        let timing = self.opts.timing;
        let vh = input.viewport.height;
        let track = &mut self.tracks[index];

        if read.signed_distance > 0.0 && read.opacity < 0.5 && !track.is_pristine() {
            track.reached_full = false;
            for card in &mut track.cards {
                *card = CardTrack::default();
            }
            tracing::debug!(section = %track.id, "card sequence reset");
            report.events.push(VisibilityEvent::CardsReset {
                section: track.id.clone(),
            });
        }

        if read.opacity >= 1.0 {
            track.reached_full = true;
        }

        // Scroll progress since the section entered its hold zone from below.
        let progress = read.zones.hold_zone_px() - read.signed_distance;

        let mut visuals = SmallVec::with_capacity(track.cards.len());
        for (card_index, card) in track.cards.iter_mut().enumerate() {
            let threshold = timing.card_threshold(vh, card_index);
            match card.phase {
                CardPhase::Pending => {
                    if track.reached_full && progress >= threshold.threshold_px {
                        card.phase = CardPhase::Revealing;
                        card.exit_at_ms = input.now_ms.saturating_add(timing.card_animation_ms);
                        tracing::debug!(section = %track.id, card = card_index, "card revealed");
                        report.events.push(VisibilityEvent::CardRevealed {
                            section: track.id.clone(),
                            card: card_index,
                            exit_at_ms: card.exit_at_ms,
                        });
                    }
                }
                CardPhase::Revealing => {
                    if input.now_ms >= card.exit_at_ms {
                        card.phase = CardPhase::Exiting;
                        tracing::debug!(section = %track.id, card = card_index, "card exiting");
                        report.events.push(VisibilityEvent::CardExitStarted {
                            section: track.id.clone(),
                            card: card_index,
                        });
                    }
                }
                CardPhase::Exiting => {}
            }
            visuals.push(CardVisual {
                phase: card.phase,
                opacity: match card.phase {
                    CardPhase::Revealing => 1.0,
                    CardPhase::Pending | CardPhase::Exiting => 0.0,
                },
                fade_distance_px: threshold.fade_distance_px,
            });
        }
        visuals
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/controller.rs"]
mod tests;
