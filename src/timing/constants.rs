use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Vh;
use crate::foundation::error::{ScrollyteError, ScrollyteResult};

/// Named scroll durations that drive every derived scroll distance.
///
/// Distances are in [`Vh`] (100 = one viewport height). Every field has a default, so a JSON
/// override file only needs the keys it changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimingConstants {
    /// Scroll distance a reader needs for the focal text before anything else happens.
    pub reading_hold: Vh,
    /// Scroll distance over which one card fades in.
    pub card_fade: Vh,
    /// Scroll distance a revealed card is held for reading.
    pub card_hold: Vh,
    /// Scroll distance over which a panel fades out after its hold zone.
    pub panel_fade: Vh,
    /// Scroll distance between panels during which nothing is visible.
    pub grey_space: Vh,
    /// Extra hold added to the terminal section.
    pub last_section_hold: Vh,
    /// Scroll distance over which the trailing element fades in.
    pub trailing_fade: Vh,
    /// Share of the fade zone kept at full opacity for proportional zones, in `[0, 1)`.
    pub proportional_hold_share: f64,
    /// Total duration of one card's reveal animation before its exit is triggered.
    pub card_animation_ms: u64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        Self {
            reading_hold: Vh(50.0),
            card_fade: Vh(30.0),
            card_hold: Vh(40.0),
            panel_fade: Vh(60.0),
            grey_space: Vh(50.0),
            last_section_hold: Vh(100.0),
            trailing_fade: Vh(30.0),
            proportional_hold_share: 0.5,
            card_animation_ms: 2400,
        }
    }
}

impl TimingConstants {
    /// Parse constants from a JSON reader; missing keys keep their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollyteResult<Self> {
        let constants: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollyteError::serde(format!("parse timing constants JSON: {e}")))?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollyteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollyteError::validation(format!(
                "open timing constants JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the table so that every derived hold zone stays below its fade zone.
    pub fn validate(&self) -> ScrollyteResult<()> {
        for (name, v) in [
            ("reading_hold", self.reading_hold),
            ("card_fade", self.card_fade),
            ("card_hold", self.card_hold),
            ("panel_fade", self.panel_fade),
            ("grey_space", self.grey_space),
            ("last_section_hold", self.last_section_hold),
            ("trailing_fade", self.trailing_fade),
        ] {
            if !v.is_valid_distance() {
                return Err(ScrollyteError::timing(format!(
                    "{name} must be finite and >= 0 (got {})",
                    v.0
                )));
            }
        }
        if self.panel_fade.0 <= 0.0 {
            return Err(ScrollyteError::timing(
                "panel_fade must be > 0 so the fade zone exceeds the hold zone",
            ));
        }
        if !self.proportional_hold_share.is_finite()
            || !(0.0..1.0).contains(&self.proportional_hold_share)
        {
            return Err(ScrollyteError::timing(
                "proportional_hold_share must be in [0, 1)",
            ));
        }
        Ok(())
    }

    /// Scroll distance consumed by one card: its fade-in plus its reading hold.
    pub fn card_step(&self) -> Vh {
        Vh(self.card_fade.0 + self.card_hold.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/constants.rs"]
mod tests;
