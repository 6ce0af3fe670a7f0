use super::*;

const SCENE_JSON: &str = r#"{
  "sections": [
    {
      "id": "hero",
      "focal": { "text": "Look up\nand scroll", "font_size": "clamp(2rem, 5vw, 4rem)" },
      "layers": [
        { "type": "background", "depth": 0, "fill": "linear-gradient(#000, #123)" },
        {
          "type": "image",
          "depth": 20,
          "src": "moon.png",
          "position": { "top": "5%", "right": "8vw" },
          "size": { "width": 240, "height": "18vh" }
        },
        { "type": "custom", "depth": 30, "renderer": "particle_field", "config": { "count": 300 } }
      ],
      "cards": [ { "text": "one" }, { "text": "two" } ]
    },
    {
      "id": "coda",
      "focal": { "text": "Fin", "align": "right" },
      "layers": [],
      "scroll": { "height_vh": 250, "zones": { "kind": "fixed", "hold": 20, "fade": 45 } }
    }
  ]
}"#;

#[test]
fn parses_typed_scene() {
    let scene = Scene::from_json_str(SCENE_JSON).unwrap();
    assert_eq!(scene.sections.len(), 2);

    let hero = scene.section("hero").unwrap();
    assert_eq!(hero.focal.line_count(), 2);
    assert_eq!(hero.focal.align, FocalAlign::Center);
    assert_eq!(hero.card_count(), 2);
    assert_eq!(hero.scroll, ScrollConfig::default());

    let depths: Vec<_> = hero.layers.iter().map(Layer::depth).collect();
    assert_eq!(depths, vec![0, 20, 30]);
    let kinds: Vec<_> = hero.layers.iter().map(Layer::kind_name).collect();
    assert_eq!(kinds, vec!["background", "image", "custom"]);

    let Layer::Image(img) = &hero.layers[1] else {
        panic!("expected image layer");
    };
    let pos = img.position.unwrap();
    assert_eq!(pos.top, Some(Length::Percent(5.0)));
    assert_eq!(pos.right, Some(Length::ViewportWidth(8.0)));
    assert_eq!(pos.left, None);
    let size = img.size.unwrap();
    assert_eq!(size.width, Some(Length::Px(240.0)));
    assert_eq!(size.height, Some(Length::ViewportHeight(18.0)));

    let Layer::Custom(custom) = &hero.layers[2] else {
        panic!("expected custom layer");
    };
    assert_eq!(custom.renderer, CustomRenderer::ParticleField);
    assert_eq!(custom.config["count"], 300);

    let coda = scene.section("coda").unwrap();
    assert_eq!(coda.focal.align, FocalAlign::Right);
    assert_eq!(coda.scroll.height_vh, Some(250));
    assert_eq!(
        coda.scroll.zones,
        ZoneSource::Fixed {
            hold: Vh(20.0),
            fade: Vh(45.0)
        }
    );
    assert!(scene.section("missing").is_none());
}

#[test]
fn typed_scene_revalidates_cleanly() {
    let scene = Scene::from_json_str(SCENE_JSON).unwrap();
    let report = scene.schema_report().unwrap();
    assert!(report.valid, "{:?}", report.errors);
    scene.validate().unwrap();
}

#[test]
fn raw_schema_errors_surface_before_decoding() {
    let json = SCENE_JSON.replace(r#""depth": 30"#, r#""depth": 75"#);
    let err = Scene::from_json_str(&json).unwrap_err();
    assert!(matches!(err, ScrollyteError::Validation(_)));
    assert!(err.to_string().contains("$.sections[0].layers[2].depth"));
}

#[test]
fn unknown_renderer_is_a_validation_error() {
    let json = SCENE_JSON.replace("particle_field", "lava_lamp");
    let err = Scene::from_json_str(&json).unwrap_err();
    assert!(err.to_string().contains("unknown renderer \"lava_lamp\""));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Scene::from_json_str("{ \"sections\": [").unwrap_err();
    assert!(matches!(err, ScrollyteError::Serde(_)));
}

#[test]
fn mutated_typed_scene_fails_validate() {
    let mut scene = Scene::from_json_str(SCENE_JSON).unwrap();
    if let Layer::Background(bg) = &mut scene.sections[0].layers[0] {
        bg.depth = crate::FOCAL_DEPTH;
    }
    scene.sections[1].id = "hero".to_owned();
    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("exceeds the ceiling"), "{err}");
    assert!(err.contains("duplicate section id"), "{err}");
}

#[test]
fn renderer_keys_round_trip() {
    for r in CustomRenderer::ALL {
        assert_eq!(CustomRenderer::from_key(r.key()), Some(r));
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json, serde_json::Value::String(r.key().to_owned()));
    }
    assert_eq!(CustomRenderer::from_key("nope"), None);
}

#[test]
fn resolve_scroll_heights_fills_only_missing_heights() {
    let mut scene = Scene::from_json_str(SCENE_JSON).unwrap();
    let timing = TimingConstants::default();
    scene.resolve_scroll_heights(&timing, 0.6).unwrap();

    // hero: 2 cards, calculated zones: hold 190, fade 250 => 500 + 50 + 190
    assert_eq!(scene.sections[0].scroll.height_vh, Some(740));
    // coda keeps its explicit height
    assert_eq!(scene.sections[1].scroll.height_vh, Some(250));
}

#[test]
fn last_section_gets_the_extra_hold() {
    let json = SCENE_JSON.replace(r#""height_vh": 250, "#, "");
    let mut scene = Scene::from_json_str(&json).unwrap();
    scene
        .resolve_scroll_heights(&TimingConstants::default(), 0.6)
        .unwrap();
    // coda: fixed fade 45 => 90 + 50 + (50 + 100)
    assert_eq!(scene.sections[1].scroll.height_vh, Some(290));
}

#[test]
fn pinned_height_must_cover_the_fade_zone() {
    // coda: fixed fade 45 => needs more than 2 * (45 - 50) vh, so any height passes
    let json = SCENE_JSON.replace(r#""height_vh": 250"#, r#""height_vh": 1"#);
    let mut scene = Scene::from_json_str(&json).unwrap();
    scene
        .resolve_scroll_heights(&TimingConstants::default(), 0.6)
        .unwrap();
    assert_eq!(scene.sections[1].scroll.height_vh, Some(1));

    // hero: 2 cards, calculated fade 250 => needs more than 400vh
    let mut scene = Scene::from_json_str(SCENE_JSON).unwrap();
    scene.sections[0].scroll.height_vh = Some(400);
    let err = scene
        .resolve_scroll_heights(&TimingConstants::default(), 0.6)
        .unwrap_err();
    assert!(err.to_string().contains("section 'hero'"), "{err}");

    scene.sections[0].scroll.height_vh = Some(401);
    scene
        .resolve_scroll_heights(&TimingConstants::default(), 0.6)
        .unwrap();
    assert_eq!(scene.sections[0].scroll.height_vh, Some(401));
}

#[test]
fn from_path_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(&path, SCENE_JSON).unwrap();
    let scene = Scene::from_path(&path).unwrap();
    assert_eq!(scene.sections[0].id, "hero");

    let err = Scene::from_path(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("open scene JSON"));
}
