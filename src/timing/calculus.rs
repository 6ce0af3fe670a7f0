use crate::foundation::core::Vh;
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::scene::model::{ScrollConfig, ZoneSource};
use crate::timing::constants::TimingConstants;

/// Distance-from-center thresholds for one section, in pixels.
///
/// Only [`FadeZones::new`] builds this type, so `hold_zone_px < fade_zone_px` always holds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeZones {
    hold_zone_px: f64,
    fade_zone_px: f64,
}

impl FadeZones {
    /// Build zones, rejecting non-finite or negative values and `hold >= fade`.
    pub fn new(hold_zone_px: f64, fade_zone_px: f64) -> ScrollyteResult<Self> {
        if !hold_zone_px.is_finite() || hold_zone_px < 0.0 {
            return Err(ScrollyteError::timing(format!(
                "hold zone must be finite and >= 0 (got {hold_zone_px})"
            )));
        }
        if !fade_zone_px.is_finite() {
            return Err(ScrollyteError::timing(format!(
                "fade zone must be finite (got {fade_zone_px})"
            )));
        }
        if hold_zone_px >= fade_zone_px {
            return Err(ScrollyteError::timing(format!(
                "hold zone ({hold_zone_px}) must be strictly less than fade zone ({fade_zone_px})"
            )));
        }
        Ok(Self {
            hold_zone_px,
            fade_zone_px,
        })
    }

    /// Distance below which the section is fully opaque.
    pub fn hold_zone_px(&self) -> f64 {
        self.hold_zone_px
    }

    /// Distance at and beyond which the section is fully transparent.
    pub fn fade_zone_px(&self) -> f64 {
        self.fade_zone_px
    }

    /// Width of the linear fade band.
    pub fn fade_span_px(&self) -> f64 {
        self.fade_zone_px - self.hold_zone_px
    }
}

/// Reveal point of one card, measured as scroll progress into its section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CardThreshold {
    /// Progress (px) at which the card's reveal triggers.
    pub threshold_px: f64,
    /// Scroll distance (px) the card's fade-in spans.
    pub fade_distance_px: f64,
}

impl TimingConstants {
    /// Total scroll height (whole vh, rounded up) a section needs.
    ///
    /// `fade_zone` is the section's fade zone in vh; it is paid once on entry and once on exit.
    pub fn section_scroll_height(&self, card_count: usize, is_last: bool, fade_zone: Vh) -> u32 {
        let mut hold = self.reading_hold.0;
        for _ in 0..card_count {
            hold += self.card_fade.0 + self.card_hold.0;
        }
        if is_last {
            hold += self.last_section_hold.0;
        }
        let total = 2.0 * fade_zone.0 + self.grey_space.0 + hold;
        total.max(0.0).ceil() as u32
    }

    /// Reveal threshold of card `card_index` for a viewport `viewport_height_px` tall.
    pub fn card_threshold(&self, viewport_height_px: f64, card_index: usize) -> CardThreshold {
        let base = self.reading_hold.to_px(viewport_height_px);
        let step = self.card_step().to_px(viewport_height_px);
        CardThreshold {
            threshold_px: base + step * card_index as f64,
            fade_distance_px: self.card_fade.to_px(viewport_height_px),
        }
    }

    /// Hold and fade zones derived from the reading time of a section with `card_count` cards.
    pub fn fade_zones(
        &self,
        viewport_height_px: f64,
        card_count: usize,
    ) -> ScrollyteResult<FadeZones> {
        let (hold, fade) = self.calculated_zones_vh(card_count);
        FadeZones::new(
            hold.to_px(viewport_height_px),
            fade.to_px(viewport_height_px),
        )
    }

    fn calculated_zones_vh(&self, card_count: usize) -> (Vh, Vh) {
        let hold = self.reading_hold.0 + self.card_step().0 * card_count as f64;
        (Vh(hold), Vh(hold + self.panel_fade.0))
    }

    /// Hold and fade zones (in vh) for a section's zone source.
    ///
    /// `default_fraction` is the viewport fraction used by proportional zones that don't
    /// declare their own `fade_zone`.
    pub fn zone_bounds_vh(
        &self,
        scroll: &ScrollConfig,
        card_count: usize,
        default_fraction: f64,
    ) -> ScrollyteResult<(Vh, Vh)> {
        let (hold, fade) = match scroll.zones {
            ZoneSource::Calculated => self.calculated_zones_vh(card_count),
            ZoneSource::Proportional => {
                let fraction = scroll.fade_zone.unwrap_or(default_fraction);
                if !fraction.is_finite() || fraction <= 0.0 {
                    return Err(ScrollyteError::timing(format!(
                        "fade zone fraction must be finite and > 0 (got {fraction})"
                    )));
                }
                let fade = fraction * 100.0;
                (Vh(fade * self.proportional_hold_share), Vh(fade))
            }
            ZoneSource::Fixed { hold, fade } => (hold, fade),
        };
        if !hold.is_valid_distance() || !fade.is_valid_distance() || hold.0 >= fade.0 {
            return Err(ScrollyteError::timing(format!(
                "hold zone ({}vh) must be strictly less than fade zone ({}vh)",
                hold.0, fade.0
            )));
        }
        Ok((hold, fade))
    }

    /// Resolve a section's zones in pixels; every zone source goes through here.
    pub fn resolve_zones(
        &self,
        scroll: &ScrollConfig,
        card_count: usize,
        viewport_height_px: f64,
        default_fraction: f64,
    ) -> ScrollyteResult<FadeZones> {
        let (hold, fade) = self.zone_bounds_vh(scroll, card_count, default_fraction)?;
        FadeZones::new(
            hold.to_px(viewport_height_px),
            fade.to_px(viewport_height_px),
        )
    }
}

/// Whether a section `height_vh` tall reaches zero opacity before it scrolls off screen.
///
/// The section leaves the viewport once its center is `height / 2 + 50` vh from the viewport
/// center, so that distance must lie beyond the fade zone. Entry is symmetric.
pub fn height_covers_fade(height_vh: u32, fade: Vh) -> bool {
    f64::from(height_vh) / 2.0 + 50.0 > fade.0
}

/// Reject a declared `height_vh` too short for the section's fade zone.
pub fn check_declared_height(height_vh: u32, fade: Vh) -> ScrollyteResult<()> {
    if height_covers_fade(height_vh, fade) {
        return Ok(());
    }
    Err(ScrollyteError::timing(format!(
        "scroll height {height_vh}vh leaves the viewport before its {}vh fade zone completes \
         (needs more than {}vh)",
        fade.0,
        2.0 * (fade.0 - 50.0)
    )))
}

/// [`TimingConstants::section_scroll_height`] with the default table.
pub fn calculate_section_height(card_count: usize, is_last: bool, fade_zone: Vh) -> u32 {
    TimingConstants::default().section_scroll_height(card_count, is_last, fade_zone)
}

/// [`TimingConstants::card_threshold`] with the default table.
pub fn calculate_card_threshold(viewport_height_px: f64, card_index: usize) -> CardThreshold {
    TimingConstants::default().card_threshold(viewport_height_px, card_index)
}

/// [`TimingConstants::fade_zones`] with the default table.
pub fn calculate_fade_zones(
    viewport_height_px: f64,
    card_count: usize,
) -> ScrollyteResult<FadeZones> {
    TimingConstants::default().fade_zones(viewport_height_px, card_count)
}

#[cfg(test)]
#[path = "../../tests/unit/timing/calculus.rs"]
mod tests;
