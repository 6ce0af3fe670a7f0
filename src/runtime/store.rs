use std::collections::BTreeMap;

use smallvec::SmallVec;

/// Per-tick visibility of a section, derived from its distance to the viewport center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Fully transparent (or off-screen).
    Hidden,
    /// Approaching the viewport center; opacity rising.
    FadingIn,
    /// Inside the hold zone; fully opaque.
    Held,
    /// Past the viewport center; opacity falling.
    FadingOut,
}

/// Lifecycle of one sequenced card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPhase {
    /// Not yet triggered.
    #[default]
    Pending,
    /// Reveal animation triggered; exit scheduled.
    Revealing,
    /// Exit transition running or finished.
    Exiting,
}

/// Visual decision for one card.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CardVisual {
    /// Current phase.
    pub phase: CardPhase,
    /// Target opacity for the renderer's transition.
    pub opacity: f64,
    /// Scroll distance the reveal is tuned for, in pixels.
    pub fade_distance_px: f64,
}

/// Visual decision for one section, written once per tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionVisual {
    /// Derived visibility state.
    pub state: VisibilityState,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// `false` when the section is entirely outside the viewport and should not be painted.
    pub painted: bool,
    /// One entry per card, in card order.
    pub cards: SmallVec<[CardVisual; 4]>,
}

/// Sink for controller decisions, keyed by section id.
///
/// The controller is the only writer; renderers read whatever backs the store.
pub trait VisualStateStore {
    /// Record the visual decision for section `id`.
    fn write_section(&mut self, id: &str, visual: SectionVisual);

    /// Record the opacity of the trailing element.
    fn write_trailing(&mut self, opacity: f64);
}

/// Store that keeps the latest decisions in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVisualStore {
    sections: BTreeMap<String, SectionVisual>,
    trailing_opacity: f64,
    writes: u64,
}

impl InMemoryVisualStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest decision for section `id`.
    pub fn section(&self, id: &str) -> Option<&SectionVisual> {
        self.sections.get(id)
    }

    /// Latest trailing element opacity.
    pub fn trailing_opacity(&self) -> f64 {
        self.trailing_opacity
    }

    /// All section decisions, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionVisual)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of section writes received.
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl VisualStateStore for InMemoryVisualStore {
    fn write_section(&mut self, id: &str, visual: SectionVisual) {
        self.writes += 1;
        match self.sections.get_mut(id) {
            Some(slot) => *slot = visual,
            None => {
                self.sections.insert(id.to_owned(), visual);
            }
        }
    }

    fn write_trailing(&mut self, opacity: f64) {
        self.trailing_opacity = opacity;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/store.rs"]
mod tests;
