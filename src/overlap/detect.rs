use crate::overlap::geometry::{OverlapOpts, estimate_font_px, focal_box, image_box};
use crate::scene::model::{Layer, Scene, Section};

/// Outcome of an overlap check. Warnings are advisory and never block rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct OverlapReport {
    /// `true` iff `warnings` is empty.
    pub valid: bool,
    /// Probable collisions and layers that need manual review.
    pub warnings: Vec<String>,
}

impl OverlapReport {
    fn from_warnings(warnings: Vec<String>) -> Self {
        Self {
            valid: warnings.is_empty(),
            warnings,
        }
    }
}

/// Estimate whether any positioned image layer of `section` collides with its focal text.
///
/// Custom layers are never measured; each one yields a manual-verification warning.
#[tracing::instrument(skip(section, opts), fields(section = %section.id))]
pub fn validate_hero_overlap(section: &Section, opts: &OverlapOpts) -> OverlapReport {
    let mut warnings = Vec::new();

    let expr = section
        .focal
        .font_size
        .as_deref()
        .unwrap_or(&opts.default_font_size);
    let font_px = match estimate_font_px(expr, opts.viewport) {
        Ok(px) => px,
        Err(e) => {
            warnings.push(format!(
                "focal font size could not be estimated ({e}); assuming the default"
            ));
            estimate_font_px(&opts.default_font_size, opts.viewport).unwrap_or(48.0)
        }
    };
    let focal = focal_box(&section.focal, font_px, opts);

    for (i, layer) in section.layers.iter().enumerate() {
        match layer {
            Layer::Image(image) => {
                let Some(bounds) = image_box(image, opts) else {
                    continue;
                };
                if bounds.overlaps(&focal) {
                    warnings.push(format!(
                        "image layer {i} (\"{}\") at {bounds} probably overlaps the focal text \
                         at {focal}",
                        image.src
                    ));
                }
            }
            Layer::Custom(custom) => warnings.push(format!(
                "custom layer {i} ({}) cannot be checked automatically; verify manually that \
                 it stays clear of the focal text",
                custom.renderer.key()
            )),
            Layer::Background(_) => {}
        }
    }

    for w in &warnings {
        tracing::warn!(section = %section.id, "{w}");
    }
    OverlapReport::from_warnings(warnings)
}

/// Run [`validate_hero_overlap`] over every section, prefixing warnings with the section id.
#[tracing::instrument(skip(scene, opts))]
pub fn validate_all_sections(scene: &Scene, opts: &OverlapOpts) -> OverlapReport {
    let warnings = scene
        .sections
        .iter()
        .flat_map(|section| {
            validate_hero_overlap(section, opts)
                .warnings
                .into_iter()
                .map(move |w| format!("section \"{}\": {w}", section.id))
        })
        .collect();
    OverlapReport::from_warnings(warnings)
}

#[cfg(test)]
#[path = "../../tests/unit/overlap/detect.rs"]
mod tests;
