use crate::foundation::core::{BoundingBox, Length, ROOT_FONT_PX, Rect, Size, Viewport};
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::scene::model::{FocalConfig, ImageLayer};

/// Font-size expression used when a focal config has no override.
pub const DEFAULT_FONT_SIZE: &str = "clamp(2rem, 5vw, 4rem)";

/// Knobs for the focal/layer box estimation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlapOpts {
    /// Viewport the boxes are estimated for.
    pub viewport: Viewport,
    /// Maximum width of the focal text block, excluding padding.
    pub focal_max_width_px: f64,
    /// Padding around the focal text block on every side.
    pub focal_padding_px: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// Font-size expression for focal configs without an override.
    pub default_font_size: String,
    /// Extent assumed for an image dimension that declares no size.
    pub default_layer_extent_px: f64,
}

impl Default for OverlapOpts {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            focal_max_width_px: 1000.0,
            focal_padding_px: 40.0,
            line_height: 1.2,
            default_font_size: DEFAULT_FONT_SIZE.to_owned(),
            default_layer_extent_px: 200.0,
        }
    }
}

/// Estimate the pixel font size of a responsive font-size expression.
///
/// Accepts a single length (`48px`, `3rem`, `6vw`), a sum (`calc(1rem + 4vw)`) or
/// `clamp(min, preferred, max)`. Viewport-relative terms are evaluated at `viewport.width`.
pub fn estimate_font_px(expr: &str, viewport: Viewport) -> ScrollyteResult<f64> {
    let expr = expr.trim();
    if let Some(args) = strip_call(expr, "clamp") {
        let parts = split_top_level(args);
        let [min, preferred, max] = parts.as_slice() else {
            return Err(ScrollyteError::validation(format!(
                "clamp() needs three arguments: '{expr}'"
            )));
        };
        let min = eval_sum(min, viewport)?;
        let max = eval_sum(max, viewport)?;
        let preferred = eval_sum(preferred, viewport)?;
        if min > max {
            return Err(ScrollyteError::validation(format!(
                "clamp() minimum exceeds maximum: '{expr}'"
            )));
        }
        return Ok(preferred.clamp(min, max));
    }
    eval_sum(expr, viewport)
}

fn strip_call<'a>(expr: &'a str, name: &str) -> Option<&'a str> {
    let rest = expr.strip_prefix(name)?.trim_start();
    rest.strip_prefix('(')?.strip_suffix(')')
}

fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

fn eval_sum(expr: &str, viewport: Viewport) -> ScrollyteResult<f64> {
    let expr = expr.trim();
    let inner = strip_call(expr, "calc").unwrap_or(expr);
    let mut total = 0.0;
    for term in inner.split('+') {
        let len: Length = term.parse()?;
        // Percent font sizes refer to the inherited (root) size.
        total += len.to_px(ROOT_FONT_PX, viewport);
    }
    if !total.is_finite() || total <= 0.0 {
        return Err(ScrollyteError::validation(format!(
            "font size '{expr}' must resolve to a positive size"
        )));
    }
    Ok(total)
}

/// Estimated box of the focal text block, centered on the viewport.
pub fn focal_box(focal: &FocalConfig, font_px: f64, opts: &OverlapOpts) -> BoundingBox {
    let vp = opts.viewport;
    let pad = opts.focal_padding_px;
    let content_w = (vp.width - 2.0 * pad).max(0.0).min(opts.focal_max_width_px);
    let text_h = focal.line_count() as f64 * font_px * opts.line_height;
    let size = Size::new(content_w + 2.0 * pad, text_h + 2.0 * pad);
    Rect::from_center_size(vp.center(), size).into()
}

/// Estimated box of a positioned image layer; `None` when the layer has no position.
pub fn image_box(layer: &ImageLayer, opts: &OverlapOpts) -> Option<BoundingBox> {
    let pos = layer.position?;
    let vp = opts.viewport;

    let size = layer.size.unwrap_or_default();
    let w_decl = size.width.map(|l| l.to_px(vp.width, vp));
    let h_decl = size.height.map(|l| l.to_px(vp.height, vp));
    let w = w_decl.or(h_decl).unwrap_or(opts.default_layer_extent_px);
    let h = h_decl.or(w_decl).unwrap_or(opts.default_layer_extent_px);

    let (left, right) = span(
        pos.left.map(|l| l.to_px(vp.width, vp)),
        pos.right.map(|l| l.to_px(vp.width, vp)),
        w_decl.is_some(),
        w,
        vp.width,
    );
    let (top, bottom) = span(
        pos.top.map(|l| l.to_px(vp.height, vp)),
        pos.bottom.map(|l| l.to_px(vp.height, vp)),
        h_decl.is_some(),
        h,
        vp.height,
    );
    Some(BoundingBox {
        top,
        left,
        bottom,
        right,
    })
}

/// Resolve one axis from its start/end offsets and extent.
fn span(
    start: Option<f64>,
    end: Option<f64>,
    extent_declared: bool,
    extent: f64,
    axis: f64,
) -> (f64, f64) {
    match (start, end) {
        (Some(s), Some(e)) if !extent_declared => (s, axis - e),
        (Some(s), _) => (s, s + extent),
        (None, Some(e)) => (axis - e - extent, axis - e),
        (None, None) => (0.0, extent),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlap/geometry.rs"]
mod tests;
