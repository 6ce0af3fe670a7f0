use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn section_height_sums_fades_grey_space_and_hold() {
    let t = TimingConstants::default();
    // hold 50, fade 110 => 2*110 + 50 + 50
    assert_eq!(t.section_scroll_height(0, false, Vh(110.0)), 320);
    // hold 50 + 4*70 = 330, fade 390 => 780 + 50 + 330
    assert_eq!(t.section_scroll_height(4, false, Vh(390.0)), 1160);
    assert_eq!(t.section_scroll_height(4, true, Vh(390.0)), 1260);
}

#[test]
fn section_height_rounds_up() {
    let t = TimingConstants::default();
    assert_eq!(t.section_scroll_height(0, false, Vh(33.3)), 167);
}

#[test]
fn card_thresholds_step_by_fade_plus_hold() {
    let t = TimingConstants::default();
    let first = t.card_threshold(1000.0, 0);
    assert!(approx(first.threshold_px, 500.0));
    assert!(approx(first.fade_distance_px, 300.0));

    let third = t.card_threshold(1000.0, 2);
    assert!(approx(third.threshold_px, 1900.0));
}

#[test]
fn calculated_zones_grow_with_card_count() {
    let t = TimingConstants::default();
    let z0 = t.fade_zones(1000.0, 0).unwrap();
    assert!(approx(z0.hold_zone_px(), 500.0));
    assert!(approx(z0.fade_zone_px(), 1100.0));
    assert!(approx(z0.fade_span_px(), 600.0));

    let z4 = t.fade_zones(1000.0, 4).unwrap();
    assert!(approx(z4.hold_zone_px(), 3300.0));
    assert!(approx(z4.fade_zone_px(), 3900.0));
}

#[test]
fn fade_zones_new_rejects_bad_ordering() {
    assert!(FadeZones::new(100.0, 200.0).is_ok());
    assert!(matches!(
        FadeZones::new(200.0, 200.0),
        Err(ScrollyteError::Timing(_))
    ));
    assert!(FadeZones::new(300.0, 200.0).is_err());
    assert!(FadeZones::new(-1.0, 200.0).is_err());
    assert!(FadeZones::new(0.0, f64::INFINITY).is_err());
    assert!(FadeZones::new(f64::NAN, 10.0).is_err());
}

#[test]
fn declared_height_must_exceed_twice_the_fade_beyond_half_a_viewport() {
    assert!(!height_covers_fade(100, Vh(110.0)));
    assert!(!height_covers_fade(120, Vh(110.0)));
    assert!(height_covers_fade(121, Vh(110.0)));
    assert!(height_covers_fade(1, Vh(40.0)));

    assert!(check_declared_height(121, Vh(110.0)).is_ok());
    assert!(matches!(
        check_declared_height(120, Vh(110.0)),
        Err(ScrollyteError::Timing(_))
    ));
}

#[test]
fn proportional_zones_use_section_fraction_or_default() {
    let t = TimingConstants::default();
    let mut scroll = ScrollConfig {
        zones: ZoneSource::Proportional,
        ..ScrollConfig::default()
    };

    let (hold, fade) = t.zone_bounds_vh(&scroll, 3, 0.6).unwrap();
    assert!(approx(fade.0, 60.0));
    assert!(approx(hold.0, 30.0));

    scroll.fade_zone = Some(0.8);
    let z = t.resolve_zones(&scroll, 3, 1000.0, 0.6).unwrap();
    assert!(approx(z.fade_zone_px(), 800.0));
    assert!(approx(z.hold_zone_px(), 400.0));
}

#[test]
fn proportional_zones_reject_non_positive_fraction() {
    let t = TimingConstants::default();
    let scroll = ScrollConfig {
        fade_zone: Some(0.0),
        zones: ZoneSource::Proportional,
        ..ScrollConfig::default()
    };
    assert!(t.zone_bounds_vh(&scroll, 0, 0.6).is_err());
}

#[test]
fn fixed_zones_pass_through_and_are_ordered() {
    let t = TimingConstants::default();
    let ok = ScrollConfig {
        zones: ZoneSource::Fixed {
            hold: Vh(20.0),
            fade: Vh(45.0),
        },
        ..ScrollConfig::default()
    };
    let z = t.resolve_zones(&ok, 7, 800.0, 0.6).unwrap();
    assert!(approx(z.hold_zone_px(), 160.0));
    assert!(approx(z.fade_zone_px(), 360.0));

    let inverted = ScrollConfig {
        zones: ZoneSource::Fixed {
            hold: Vh(80.0),
            fade: Vh(40.0),
        },
        ..ScrollConfig::default()
    };
    let err = t.zone_bounds_vh(&inverted, 0, 0.6).unwrap_err();
    assert!(err.to_string().contains("strictly less"));
}

#[test]
fn calculated_source_matches_fade_zones() {
    let t = TimingConstants::default();
    let z = t
        .resolve_zones(&ScrollConfig::default(), 2, 900.0, 0.6)
        .unwrap();
    assert_eq!(z, t.fade_zones(900.0, 2).unwrap());
}

#[test]
fn free_wrappers_use_default_constants() {
    let t = TimingConstants::default();
    assert_eq!(
        calculate_section_height(2, true, Vh(250.0)),
        t.section_scroll_height(2, true, Vh(250.0))
    );
    assert_eq!(
        calculate_card_threshold(720.0, 1),
        t.card_threshold(720.0, 1)
    );
    assert_eq!(
        calculate_fade_zones(720.0, 1).unwrap(),
        t.fade_zones(720.0, 1).unwrap()
    );
}

#[test]
fn derived_height_lets_fade_out_finish_on_screen() {
    let t = TimingConstants::default();
    for cards in 0..6 {
        for is_last in [false, true] {
            let (_, fade) = t
                .zone_bounds_vh(&ScrollConfig::default(), cards, 0.6)
                .unwrap();
            let height = f64::from(t.section_scroll_height(cards, is_last, fade));
            // Fully faded out once the center is `fade` above the viewport center; the
            // section bottom must still be below the viewport top at that point.
            let bottom_when_faded = 50.0 - fade.0 + height / 2.0;
            assert!(bottom_when_faded > 0.0, "cards={cards} last={is_last}");
        }
    }
}
