//! Author-time overlap heuristic between the focal zone and positioned layers.
//!
//! Font metrics and text reflow are estimated rather than measured, so results are advisory.

pub(crate) mod detect;
pub(crate) mod geometry;
