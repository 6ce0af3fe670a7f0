use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{ScrollyteError, ScrollyteResult};

pub use kurbo::{Point, Rect, Size};

/// Paint depth reserved for the focal text zone.
pub const FOCAL_DEPTH: i32 = 100;

/// Highest depth a decorative layer may use.
pub const MAX_LAYER_DEPTH: i32 = 50;

/// Lowest depth a decorative layer may use.
pub const MIN_LAYER_DEPTH: i32 = 0;

/// Viewport dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> ScrollyteResult<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ScrollyteError::validation(
                "viewport width must be finite and > 0",
            ));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(ScrollyteError::validation(
                "viewport height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Viewport center in pixels.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Distance in viewport-height units, where `100` is one full viewport height.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Vh(pub f64);

impl Vh {
    /// Convert to pixels for a viewport of `viewport_height` pixels.
    pub fn to_px(self, viewport_height: f64) -> f64 {
        self.0 * viewport_height / 100.0
    }

    /// Convert a pixel distance back to vh for a viewport of `viewport_height` pixels.
    pub fn from_px(px: f64, viewport_height: f64) -> Self {
        Self(px * 100.0 / viewport_height)
    }

    /// Return `true` when the value is finite and non-negative.
    pub fn is_valid_distance(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

/// Axis-aligned rectangle in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

impl BoundingBox {
    /// Width in pixels (never negative).
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// Height in pixels (never negative).
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Return `true` unless the boxes are separated on at least one axis.
    ///
    /// Touching edges count as overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self {
            top: r.y0,
            left: r.x0,
            bottom: r.y1,
            right: r.x1,
        }
    }
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        Rect::new(b.left, b.top, b.right, b.bottom)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[top {:.0}, left {:.0}, bottom {:.0}, right {:.0}]",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// Root font size used to resolve `rem`/`em` lengths.
pub const ROOT_FONT_PX: f64 = 16.0;

/// A CSS-like length used for layer offsets, sizes and font sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    /// Absolute pixels (a bare `0` parses as zero pixels).
    Px(f64),
    /// Percentage of the containing axis.
    Percent(f64),
    /// Percentage of viewport width (`vw`).
    ViewportWidth(f64),
    /// Percentage of viewport height (`vh`).
    ViewportHeight(f64),
    /// Multiple of the root font size (`rem` or `em`).
    Rem(f64),
}

impl Length {
    /// Resolve to pixels; `axis_px` is the extent percentages refer to.
    pub fn to_px(self, axis_px: f64, viewport: Viewport) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(v) => v * axis_px / 100.0,
            Self::ViewportWidth(v) => v * viewport.width / 100.0,
            Self::ViewportHeight(v) => v * viewport.height / 100.0,
            Self::Rem(v) => v * ROOT_FONT_PX,
        }
    }
}

impl FromStr for Length {
    type Err = ScrollyteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let num = |v: &str| -> ScrollyteResult<f64> {
            let n: f64 = v
                .trim()
                .parse()
                .map_err(|_| ScrollyteError::validation(format!("invalid length '{s}'")))?;
            if !n.is_finite() {
                return Err(ScrollyteError::validation(format!(
                    "length '{s}' must be finite"
                )));
            }
            Ok(n)
        };

        if let Some(v) = s.strip_suffix('%') {
            Ok(Self::Percent(num(v)?))
        } else if let Some(v) = s.strip_suffix("px") {
            Ok(Self::Px(num(v)?))
        } else if let Some(v) = s.strip_suffix("vw") {
            Ok(Self::ViewportWidth(num(v)?))
        } else if let Some(v) = s.strip_suffix("vh") {
            Ok(Self::ViewportHeight(num(v)?))
        } else if let Some(v) = s.strip_suffix("rem") {
            Ok(Self::Rem(num(v)?))
        } else if let Some(v) = s.strip_suffix("em") {
            Ok(Self::Rem(num(v)?))
        } else {
            let n = num(&s)?;
            if n == 0.0 {
                Ok(Self::Px(0.0))
            } else {
                Err(ScrollyteError::validation(format!(
                    "length '{s}' is missing a unit"
                )))
            }
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
            Self::ViewportWidth(v) => write!(f, "{v}vw"),
            Self::ViewportHeight(v) => write!(f, "{v}vh"),
            Self::Rem(v) => write!(f, "{v}rem"),
        }
    }
}

impl serde::Serialize for Length {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Px(f64),
            Css(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Px(v) => Ok(Self::Px(v)),
            Repr::Css(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
