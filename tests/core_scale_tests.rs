use approx::assert_relative_eq;
use chart_geom::ChartError;
use chart_geom::core::{
    BandScale, Bounds, MAX_BAND_CATEGORIES, NumericScale, NumericScaleKind, Scale, ScaleType,
    build_categorical_scale, build_numeric_scale,
};

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = build_numeric_scale(
        Bounds::new(10.0, 110.0),
        Bounds::new(0.0, 1000.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale");

    let original = 42.5;
    let px = scale.apply(original);
    let recovered = scale.invert(px);

    assert!((px - 325.0).abs() <= 1e-9);
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn inverted_range_maps_larger_values_higher() {
    let scale = NumericScale::new(
        Bounds::new(0.0, 10.0),
        Bounds::new(100.0, 0.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale");

    assert_eq!(scale.apply(0.0), 100.0);
    assert_eq!(scale.apply(10.0), 0.0);
    assert_eq!(scale.apply(5.0), 50.0);
    assert!((scale.invert(25.0) - 7.5).abs() <= 1e-9);
}

#[test]
fn zero_span_domain_maps_to_range_midpoint() {
    let scale = NumericScale::new(
        Bounds::new(5.0, 5.0),
        Bounds::new(0.0, 100.0),
        NumericScaleKind::Linear,
    )
    .expect("zero span domain is valid");

    assert_eq!(scale.apply(5.0), 50.0);
    assert_eq!(scale.apply(-3.0), 50.0);
    assert_eq!(scale.invert(80.0), 5.0);
}

#[test]
fn invalid_domains_are_rejected() {
    let reversed = NumericScale::new(
        Bounds::new(10.0, 0.0),
        Bounds::new(0.0, 100.0),
        NumericScaleKind::Linear,
    );
    assert!(matches!(reversed, Err(ChartError::InvalidDomain { .. })));

    let non_finite = NumericScale::new(
        Bounds::new(0.0, f64::NAN),
        Bounds::new(0.0, 100.0),
        NumericScaleKind::Linear,
    );
    assert!(matches!(non_finite, Err(ChartError::InvalidDomain { .. })));

    let bad_range = NumericScale::new(
        Bounds::new(0.0, 1.0),
        Bounds::new(0.0, f64::INFINITY),
        NumericScaleKind::Linear,
    );
    assert!(matches!(bad_range, Err(ChartError::InvalidRange { .. })));
}

#[test]
fn log_scale_requires_positive_domain() {
    let result = build_numeric_scale(
        Bounds::new(0.0, 100.0),
        Bounds::new(0.0, 200.0),
        NumericScaleKind::Log,
    );
    assert!(matches!(result, Err(ChartError::InvalidDomain { .. })));
}

#[test]
fn log_scale_maps_decades_evenly() {
    let scale = build_numeric_scale(
        Bounds::new(1.0, 1000.0),
        Bounds::new(0.0, 300.0),
        NumericScaleKind::Log,
    )
    .expect("valid log scale");

    assert_relative_eq!(scale.apply(10.0), 100.0, epsilon = 1e-9);
    assert_relative_eq!(scale.apply(100.0), 200.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(200.0), 100.0, max_relative = 1e-12);
    assert!(scale.apply(-1.0).is_nan());
}

#[test]
fn log_ticks_follow_one_two_five_ladder() {
    let scale = build_numeric_scale(
        Bounds::new(1.0, 100.0),
        Bounds::new(0.0, 300.0),
        NumericScaleKind::Log,
    )
    .expect("valid log scale");

    assert_eq!(scale.ticks(10), vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]);
}

#[test]
fn nice_rounds_domain_outward() {
    let scale = build_numeric_scale(
        Bounds::new(0.13, 9.7),
        Bounds::new(0.0, 100.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale")
    .nice(10);

    assert_eq!(scale.domain(), Bounds::new(0.0, 10.0));
}

#[test]
fn nice_log_domain_snaps_to_powers_of_ten() {
    let scale = build_numeric_scale(
        Bounds::new(3.0, 420.0),
        Bounds::new(0.0, 100.0),
        NumericScaleKind::Log,
    )
    .expect("valid scale")
    .nice(10);

    assert_eq!(scale.domain(), Bounds::new(1.0, 1000.0));
}

#[test]
fn band_scale_without_padding_splits_range_evenly() {
    let scale = build_categorical_scale(Bounds::new(0.0, 2.0), Bounds::new(0.0, 300.0), 0.0)
        .expect("valid band scale");

    assert_eq!(scale.category_count(), 3);
    assert_eq!(scale.bandwidth(), 100.0);
    assert_eq!(scale.step(), 100.0);
    assert_eq!(scale.apply(1.0), 100.0);
    assert_eq!(scale.apply_center(2.0), 250.0);
    assert_eq!(scale.categories(), vec![0.0, 1.0, 2.0]);
}

#[test]
fn band_scale_default_padding_centres_bands() {
    let scale = BandScale::new(Bounds::new(0.0, 3.0), Bounds::new(0.0, 410.0), 0.1)
        .expect("valid band scale");

    assert!((scale.step() - 100.0).abs() <= 1e-9);
    assert!((scale.bandwidth() - 90.0).abs() <= 1e-9);
    assert!((scale.apply(0.0) - 10.0).abs() <= 1e-9);
    assert!((scale.apply_center(3.0) - 355.0).abs() <= 1e-9);
}

#[test]
fn band_scale_reversed_range_flips_order() {
    let scale = BandScale::new(Bounds::new(0.0, 1.0), Bounds::new(200.0, 0.0), 0.0)
        .expect("valid band scale");

    assert_eq!(scale.apply_center(0.0), 150.0);
    assert_eq!(scale.apply_center(1.0), 50.0);
}

#[test]
fn band_accessors_reject_out_of_domain_categories() {
    let scale = BandScale::new(Bounds::new(0.0, 2.0), Bounds::new(0.0, 300.0), 0.0)
        .expect("valid band scale");

    assert_eq!(scale.band_start(1.0), Some(100.0));
    assert_eq!(scale.band_center(0.0), Some(50.0));
    assert_eq!(scale.band_start(3.0), None);
    assert_eq!(scale.band_start(-1.0), None);
    assert_eq!(scale.category_index(1.5), None);
}

#[test]
fn band_scale_rejects_oversized_category_domains() {
    let huge = build_categorical_scale(Bounds::new(0.0, 1e20), Bounds::new(0.0, 400.0), 0.1);
    assert!(matches!(huge, Err(ChartError::InvalidDomain { .. })));

    let largest = BandScale::new(
        Bounds::new(0.0, (MAX_BAND_CATEGORIES - 1) as f64),
        Bounds::new(0.0, 400.0),
        0.0,
    )
    .expect("largest band scale");
    assert_eq!(largest.category_count(), MAX_BAND_CATEGORIES);
}

#[test]
fn band_padding_is_clamped() {
    let scale = BandScale::new(Bounds::new(0.0, 1.0), Bounds::new(0.0, 100.0), -3.0)
        .expect("valid band scale");
    assert_eq!(scale.padding(), 0.0);

    let scale = BandScale::new(Bounds::new(0.0, 1.0), Bounds::new(0.0, 100.0), f64::NAN)
        .expect("valid band scale");
    assert_eq!(scale.padding(), 0.1);
}

#[test]
fn scale_enum_reports_its_variant() {
    let numeric: Scale = build_numeric_scale(
        Bounds::new(0.0, 1.0),
        Bounds::new(0.0, 10.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale")
    .into();
    let band: Scale = build_categorical_scale(Bounds::new(0.0, 4.0), Bounds::new(0.0, 10.0), 0.1)
        .expect("valid scale")
        .into();

    assert_eq!(numeric.scale_type(), ScaleType::Linear);
    assert!(numeric.as_band().is_none());
    assert_eq!(band.scale_type(), ScaleType::Band);
    assert!(band.is_band());
    assert_eq!(band.domain(), Bounds::new(0.0, 4.0));
}
