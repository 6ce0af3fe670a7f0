use super::*;

use crate::scene::model::{EdgeOffsets, FocalAlign, LayerSize};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h).unwrap()
}

fn focal(text: &str) -> FocalConfig {
    FocalConfig {
        text: text.to_owned(),
        align: FocalAlign::Center,
        font_size: None,
    }
}

fn image(position: EdgeOffsets, size: Option<LayerSize>) -> ImageLayer {
    ImageLayer {
        depth: 10,
        src: "x.png".to_owned(),
        position: Some(position),
        size,
    }
}

#[test]
fn default_font_clamps_to_bounds() {
    // 5vw of 1920 = 96px, clamped to 4rem = 64px
    assert!(approx(estimate_font_px(DEFAULT_FONT_SIZE, vp(1920.0, 1080.0)).unwrap(), 64.0));
    // 5vw of 800 = 40px, inside [32, 64]
    assert!(approx(estimate_font_px(DEFAULT_FONT_SIZE, vp(800.0, 600.0)).unwrap(), 40.0));
    // 5vw of 375 = 18.75px, clamped to 2rem = 32px
    assert!(approx(estimate_font_px(DEFAULT_FONT_SIZE, vp(375.0, 667.0)).unwrap(), 32.0));
}

#[test]
fn single_lengths_and_sums() {
    let v = vp(1000.0, 800.0);
    assert!(approx(estimate_font_px("48px", v).unwrap(), 48.0));
    assert!(approx(estimate_font_px("3rem", v).unwrap(), 48.0));
    assert!(approx(estimate_font_px("150%", v).unwrap(), 24.0));
    assert!(approx(estimate_font_px("calc(1rem + 2vw)", v).unwrap(), 36.0));
    assert!(approx(
        estimate_font_px("clamp(1rem, calc(1rem + 4vw), 3rem)", v).unwrap(),
        48.0
    ));
}

#[test]
fn bad_font_expressions_are_errors() {
    let v = vp(1000.0, 800.0);
    assert!(estimate_font_px("huge", v).is_err());
    assert!(estimate_font_px("clamp(1rem, 2vw)", v).is_err());
    assert!(estimate_font_px("clamp(4rem, 2vw, 1rem)", v).is_err());
    assert!(estimate_font_px("0px", v).is_err());
}

#[test]
fn focal_box_is_centered_with_padding() {
    let opts = OverlapOpts::default();
    let b = focal_box(&focal("Hello"), 64.0, &opts);
    assert!(approx(b.left, 420.0));
    assert!(approx(b.right, 1500.0));
    // 64 * 1.2 + 80 = 156.8 tall, centered on 540
    assert!(approx(b.top, 461.6));
    assert!(approx(b.bottom, 618.4));
}

#[test]
fn focal_box_grows_per_line_and_shrinks_with_narrow_viewports() {
    let opts = OverlapOpts {
        viewport: vp(600.0, 1000.0),
        ..OverlapOpts::default()
    };
    let b = focal_box(&focal("a\nb\nc"), 20.0, &opts);
    assert!(approx(b.width(), 600.0));
    assert!(approx(b.height(), 3.0 * 20.0 * 1.2 + 80.0));
}

#[test]
fn image_box_from_top_left_and_size() {
    let opts = OverlapOpts::default();
    let layer = image(
        EdgeOffsets {
            top: Some(Length::Percent(40.0)),
            left: Some(Length::Percent(50.0)),
            ..EdgeOffsets::default()
        },
        Some(LayerSize {
            width: Some(Length::Px(300.0)),
            height: Some(Length::Px(200.0)),
        }),
    );
    let b = image_box(&layer, &opts).unwrap();
    assert!(approx(b.top, 432.0));
    assert!(approx(b.left, 960.0));
    assert!(approx(b.bottom, 632.0));
    assert!(approx(b.right, 1260.0));
}

#[test]
fn image_box_derives_start_from_opposite_edge() {
    let opts = OverlapOpts::default();
    let layer = image(
        EdgeOffsets {
            bottom: Some(Length::Px(100.0)),
            right: Some(Length::ViewportWidth(10.0)),
            ..EdgeOffsets::default()
        },
        Some(LayerSize {
            width: Some(Length::Px(100.0)),
            height: None,
        }),
    );
    let b = image_box(&layer, &opts).unwrap();
    // height falls back to the declared width
    assert!(approx(b.bottom, 980.0));
    assert!(approx(b.top, 880.0));
    assert!(approx(b.right, 1728.0));
    assert!(approx(b.left, 1628.0));
}

#[test]
fn image_box_uses_both_edges_without_size() {
    let opts = OverlapOpts::default();
    let layer = image(
        EdgeOffsets {
            top: Some(Length::Px(0.0)),
            left: Some(Length::Px(100.0)),
            right: Some(Length::Px(100.0)),
            ..EdgeOffsets::default()
        },
        None,
    );
    let b = image_box(&layer, &opts).unwrap();
    assert!(approx(b.left, 100.0));
    assert!(approx(b.right, 1820.0));
    assert!(approx(b.bottom, 200.0));
}

#[test]
fn unpositioned_image_has_no_box() {
    let layer = ImageLayer {
        depth: 1,
        src: "x.png".to_owned(),
        position: None,
        size: None,
    };
    assert!(image_box(&layer, &OverlapOpts::default()).is_none());
}
