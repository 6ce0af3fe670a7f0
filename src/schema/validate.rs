use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::foundation::core::{FOCAL_DEPTH, Length, MAX_LAYER_DEPTH, MIN_LAYER_DEPTH, Vh};
use crate::foundation::error::{ScrollyteError, ScrollyteResult};
use crate::scene::model::CustomRenderer;
use crate::timing::calculus::height_covers_fade;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Outcome of [`validate_schema`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaReport {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Every structural defect, each prefixed with its JSON path.
    pub errors: Vec<String>,
}

impl SchemaReport {
    fn from_errors(errors: Vec<SchemaError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }

    /// Convert into a `Result`, joining all errors into one validation error.
    pub fn into_result(self) -> ScrollyteResult<()> {
        if self.valid {
            return Ok(());
        }
        Err(ScrollyteError::validation(format!(
            "scene schema validation failed:\n{}",
            self.errors.join("\n")
        )))
    }
}

/// Check a raw scene description for structural completeness and the depth ceiling.
///
/// Every defect is collected; nothing short-circuits. Pure and deterministic.
#[tracing::instrument(skip(scene))]
pub fn validate_schema(scene: &Value) -> SchemaReport {
    let mut errors = Vec::new();

    let Some(root) = scene.as_object() else {
        errors.push(SchemaError::at(&[], "scene must be an object"));
        return SchemaReport::from_errors(errors);
    };

    match root.get("sections") {
        None => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("sections")],
            "scene is missing a sections array",
        )),
        Some(Value::Array(sections)) => {
            let mut ids = HashSet::<&str>::new();
            for (i, section) in sections.iter().enumerate() {
                let path = [SchemaPathElem::Field("sections"), SchemaPathElem::Index(i)];
                validate_section(section, &path, &mut ids, &mut errors);
            }
        }
        Some(_) => errors.push(SchemaError::at(
            &[SchemaPathElem::Field("sections")],
            "sections must be an array",
        )),
    }

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "scene schema rejected");
    }
    SchemaReport::from_errors(errors)
}

fn join(path: &[SchemaPathElem], tail: &[SchemaPathElem]) -> Vec<SchemaPathElem> {
    [path, tail].concat()
}

fn validate_section<'a>(
    section: &'a Value,
    path: &[SchemaPathElem],
    ids: &mut HashSet<&'a str>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(obj) = section.as_object() else {
        errors.push(SchemaError::at(path, "section must be an object"));
        return;
    };

    // id
    let id_path = join(path, &[SchemaPathElem::Field("id")]);
    let label = match obj.get("id") {
        None => {
            errors.push(SchemaError::at(&id_path, "section id is missing"));
            None
        }
        Some(Value::String(id)) if id.trim().is_empty() => {
            errors.push(SchemaError::at(&id_path, "section id must be non-empty"));
            None
        }
        Some(Value::String(id)) => {
            if !ids.insert(id.as_str()) {
                errors.push(SchemaError::at(
                    &id_path,
                    format!("duplicate section id \"{id}\""),
                ));
            }
            Some(id.as_str())
        }
        Some(_) => {
            errors.push(SchemaError::at(&id_path, "section id must be a string"));
            None
        }
    };
    let who = match label {
        Some(id) => format!("section \"{id}\""),
        None => "section".to_owned(),
    };

    validate_focal(obj, path, &who, errors);

    let layers_path = join(path, &[SchemaPathElem::Field("layers")]);
    match obj.get("layers") {
        None => errors.push(SchemaError::at(
            &layers_path,
            format!("{who} is missing a layers array"),
        )),
        Some(Value::Array(layers)) => {
            for (i, layer) in layers.iter().enumerate() {
                let layer_path = join(&layers_path, &[SchemaPathElem::Index(i)]);
                validate_layer(layer, &layer_path, &who, i, errors);
            }
        }
        Some(_) => errors.push(SchemaError::at(
            &layers_path,
            format!("{who} layers must be an array"),
        )),
    }

    validate_cards(obj, path, &who, errors);
    validate_scroll(obj, path, &who, errors);
}

fn validate_focal(
    section: &Map<String, Value>,
    path: &[SchemaPathElem],
    who: &str,
    errors: &mut Vec<SchemaError>,
) {
    let focal_path = join(path, &[SchemaPathElem::Field("focal")]);
    let focal = match section.get("focal") {
        None => {
            errors.push(SchemaError::at(
                &focal_path,
                format!("{who} is missing its focal config"),
            ));
            return;
        }
        Some(Value::Object(focal)) => focal,
        Some(_) => {
            errors.push(SchemaError::at(
                &focal_path,
                format!("{who} focal config must be an object"),
            ));
            return;
        }
    };

    let text_path = join(&focal_path, &[SchemaPathElem::Field("text")]);
    match focal.get("text") {
        None => errors.push(SchemaError::at(
            &text_path,
            format!("{who} focal text is missing"),
        )),
        Some(Value::String(t)) if t.trim().is_empty() => errors.push(SchemaError::at(
            &text_path,
            format!("{who} focal text must be non-empty"),
        )),
        Some(Value::String(_)) => {}
        Some(_) => errors.push(SchemaError::at(
            &text_path,
            format!("{who} focal text must be a string"),
        )),
    }

    if let Some(align) = focal.get("align") {
        let ok = matches!(align.as_str(), Some("center" | "left" | "right"));
        if !ok {
            errors.push(SchemaError::at(
                &join(&focal_path, &[SchemaPathElem::Field("align")]),
                format!("{who} focal align must be one of center, left, right"),
            ));
        }
    }
    if let Some(size) = focal.get("font_size")
        && !size.is_string()
        && !size.is_null()
    {
        errors.push(SchemaError::at(
            &join(&focal_path, &[SchemaPathElem::Field("font_size")]),
            format!("{who} focal font_size must be a string"),
        ));
    }
}

fn validate_layer(
    layer: &Value,
    path: &[SchemaPathElem],
    who: &str,
    index: usize,
    errors: &mut Vec<SchemaError>,
) {
    let Some(obj) = layer.as_object() else {
        errors.push(SchemaError::at(
            path,
            format!("{who} layer {index} must be an object"),
        ));
        return;
    };

    let depth_path = join(path, &[SchemaPathElem::Field("depth")]);
    match obj.get("depth").map(Value::as_i64) {
        None => errors.push(SchemaError::at(
            &depth_path,
            format!("{who} layer {index} is missing a depth"),
        )),
        Some(None) => errors.push(SchemaError::at(
            &depth_path,
            format!("{who} layer {index} depth must be an integer"),
        )),
        Some(Some(d)) if d > i64::from(MAX_LAYER_DEPTH) => errors.push(SchemaError::at(
            &depth_path,
            format!(
                "{who} layer {index} depth {d} exceeds the ceiling of {MAX_LAYER_DEPTH} \
                 (depth {FOCAL_DEPTH} is reserved for focal text)"
            ),
        )),
        Some(Some(d)) if d < i64::from(MIN_LAYER_DEPTH) => errors.push(SchemaError::at(
            &depth_path,
            format!("{who} layer {index} depth {d} must be >= {MIN_LAYER_DEPTH}"),
        )),
        Some(Some(_)) => {}
    }

    let type_path = join(path, &[SchemaPathElem::Field("type")]);
    match obj.get("type").and_then(Value::as_str) {
        None => errors.push(SchemaError::at(
            &type_path,
            format!("{who} layer {index} is missing a type"),
        )),
        Some("background") => {
            if let Some(fill) = obj.get("fill")
                && !fill.is_string()
                && !fill.is_null()
            {
                errors.push(SchemaError::at(
                    &join(path, &[SchemaPathElem::Field("fill")]),
                    format!("{who} layer {index} fill must be a string"),
                ));
            }
        }
        Some("image") => {
            let ok = obj
                .get("src")
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if !ok {
                errors.push(SchemaError::at(
                    &join(path, &[SchemaPathElem::Field("src")]),
                    format!("{who} image layer {index} is missing a src"),
                ));
            }
            for field in ["position", "size"] {
                if let Some(v) = obj.get(field)
                    && !v.is_object()
                    && !v.is_null()
                {
                    errors.push(SchemaError::at(
                        &join(path, &[SchemaPathElem::Field(field)]),
                        format!("{who} image layer {index} {field} must be an object"),
                    ));
                }
            }
            validate_lengths(obj, path, "position", &["top", "right", "bottom", "left"], errors);
            validate_lengths(obj, path, "size", &["width", "height"], errors);
        }
        Some("custom") => {
            let renderer_path = join(path, &[SchemaPathElem::Field("renderer")]);
            match obj.get("renderer").and_then(Value::as_str) {
                None => errors.push(SchemaError::at(
                    &renderer_path,
                    format!("{who} custom layer {index} is missing a renderer"),
                )),
                Some(key) if CustomRenderer::from_key(key).is_none() => {
                    errors.push(SchemaError::at(
                        &renderer_path,
                        format!("{who} custom layer {index} has unknown renderer \"{key}\""),
                    ))
                }
                Some(_) => {}
            }
        }
        Some(other) => errors.push(SchemaError::at(
            &type_path,
            format!("{who} layer {index} has unknown type \"{other}\""),
        )),
    }
}

fn validate_lengths(
    layer: &Map<String, Value>,
    path: &[SchemaPathElem],
    field: &'static str,
    keys: &[&'static str],
    errors: &mut Vec<SchemaError>,
) {
    let Some(Value::Object(obj)) = layer.get(field) else {
        return;
    };
    for &key in keys {
        let Some(v) = obj.get(key) else {
            continue;
        };
        let ok = match v {
            Value::Null => true,
            Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
            Value::String(s) => s.parse::<Length>().is_ok(),
            _ => false,
        };
        if !ok {
            errors.push(SchemaError::at(
                &join(
                    path,
                    &[SchemaPathElem::Field(field), SchemaPathElem::Field(key)],
                ),
                format!("invalid length {v}"),
            ));
        }
    }
}

fn validate_cards(
    section: &Map<String, Value>,
    path: &[SchemaPathElem],
    who: &str,
    errors: &mut Vec<SchemaError>,
) {
    let cards_path = join(path, &[SchemaPathElem::Field("cards")]);
    let cards = match section.get("cards") {
        None | Some(Value::Null) => return,
        Some(Value::Array(cards)) => cards,
        Some(_) => {
            errors.push(SchemaError::at(
                &cards_path,
                format!("{who} cards must be an array"),
            ));
            return;
        }
    };
    for (i, card) in cards.iter().enumerate() {
        let ok = card
            .get("text")
            .and_then(Value::as_str)
            .is_some_and(|t| !t.trim().is_empty());
        if !ok {
            errors.push(SchemaError::at(
                &join(
                    &cards_path,
                    &[SchemaPathElem::Index(i), SchemaPathElem::Field("text")],
                ),
                format!("{who} card {i} must have non-empty text"),
            ));
        }
    }
}

fn validate_scroll(
    section: &Map<String, Value>,
    path: &[SchemaPathElem],
    who: &str,
    errors: &mut Vec<SchemaError>,
) {
    let scroll_path = join(path, &[SchemaPathElem::Field("scroll")]);
    let scroll = match section.get("scroll") {
        None | Some(Value::Null) => return,
        Some(Value::Object(scroll)) => scroll,
        Some(_) => {
            errors.push(SchemaError::at(
                &scroll_path,
                format!("{who} scroll config must be an object"),
            ));
            return;
        }
    };

    let height_path = join(&scroll_path, &[SchemaPathElem::Field("height_vh")]);
    let mut height = None;
    if let Some(h) = scroll.get("height_vh")
        && !h.is_null()
    {
        match h.as_u64().and_then(|h| u32::try_from(h).ok()).filter(|h| *h > 0) {
            Some(h) => height = Some(h),
            None => errors.push(SchemaError::at(
                &height_path,
                format!("{who} scroll height_vh must be a positive integer"),
            )),
        }
    }

    let mut fade_fraction = None;
    if let Some(f) = scroll.get("fade_zone")
        && !f.is_null()
    {
        match f.as_f64().filter(|f| f.is_finite() && *f > 0.0 && *f <= 2.0) {
            Some(f) => fade_fraction = Some(f),
            None => errors.push(SchemaError::at(
                &join(&scroll_path, &[SchemaPathElem::Field("fade_zone")]),
                format!("{who} scroll fade_zone must be a viewport fraction in (0, 2]"),
            )),
        }
    }

    // Calculated zones depend on the timing table and are checked at controller setup.
    let check_height = |fade: f64, errors: &mut Vec<SchemaError>| {
        if let Some(h) = height
            && !height_covers_fade(h, Vh(fade))
        {
            errors.push(SchemaError::at(
                &height_path,
                format!(
                    "{who} scroll height_vh ({h}) is too short for its {fade}vh fade zone \
                     (needs more than {}vh)",
                    2.0 * (fade - 50.0)
                ),
            ));
        }
    };

    let Some(zones) = scroll.get("zones") else {
        return;
    };
    let zones_path = join(&scroll_path, &[SchemaPathElem::Field("zones")]);
    match zones.get("kind").and_then(Value::as_str) {
        Some("calculated") => {}
        Some("proportional") => {
            if let Some(f) = fade_fraction {
                check_height(f * 100.0, errors);
            }
        }
        Some("fixed") => {
            let hold = zones.get("hold").and_then(Value::as_f64);
            let fade = zones.get("fade").and_then(Value::as_f64);
            match (hold, fade) {
                (Some(hold), Some(fade)) => {
                    if !hold.is_finite() || hold < 0.0 || !fade.is_finite() {
                        errors.push(SchemaError::at(
                            &zones_path,
                            format!("{who} fixed zones must be finite and >= 0"),
                        ));
                    } else if hold >= fade {
                        errors.push(SchemaError::at(
                            &zones_path,
                            format!(
                                "{who} fixed hold zone ({hold}vh) must be strictly less than \
                                 fade zone ({fade}vh)"
                            ),
                        ));
                    } else {
                        check_height(fade, errors);
                    }
                }
                _ => errors.push(SchemaError::at(
                    &zones_path,
                    format!("{who} fixed zones need numeric hold and fade"),
                )),
            }
        }
        Some(other) => errors.push(SchemaError::at(
            &join(&zones_path, &[SchemaPathElem::Field("kind")]),
            format!("{who} has unknown zone kind \"{other}\""),
        )),
        None => errors.push(SchemaError::at(
            &join(&zones_path, &[SchemaPathElem::Field("kind")]),
            format!("{who} zones are missing a kind"),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
