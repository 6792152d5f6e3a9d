use chart_geom::ChartError;
use chart_geom::core::{
    AxisConfig, AxisConfigProps, AxisData, AxisKind, Bounds, BoundsOverride, DataValue,
    DomainLimit, DrawingRect, PartialBounds, ScaleType, Series, resolve_domain, resolve_range,
};

fn rect() -> DrawingRect {
    DrawingRect::new(10.0, 20.0, 200.0, 100.0)
}

#[test]
fn partial_domain_override_wins_per_side() {
    let series = vec![Series::from_values("a", &[2.0, 8.0])];
    let props = AxisConfigProps::new().with_domain(PartialBounds::min(0.0));

    let domain = resolve_domain(&props, &series, AxisKind::Y);
    assert_eq!(domain, Bounds::new(0.0, 8.0));
}

#[test]
fn domain_transform_receives_computed_bounds() {
    let series = vec![Series::from_values("a", &[2.0, 8.0])];
    let props = AxisConfigProps::new().with_domain(BoundsOverride::transform(|bounds| {
        let pad = bounds.span() * 0.1;
        Bounds::new(bounds.min - pad, bounds.max + pad)
    }));

    let domain = resolve_domain(&props, &series, AxisKind::Y);
    assert!((domain.min - 1.4).abs() <= 1e-9);
    assert!((domain.max - 8.6).abs() <= 1e-9);
}

#[test]
fn explicit_numeric_data_takes_precedence_over_series() {
    let series = vec![Series::from_values("a", &[100.0, 200.0])];
    let props = AxisConfigProps::new().with_data(AxisData::Numbers(vec![3.0, 1.0, 7.0]));

    assert_eq!(
        resolve_domain(&props, &series, AxisKind::X),
        Bounds::new(1.0, 7.0)
    );
}

#[test]
fn label_data_resolves_to_index_range() {
    let labels = vec!["Mon".to_owned(), "Tue".to_owned(), "Wed".to_owned()];
    let props = AxisConfigProps::new().with_data(AxisData::Labels(labels));

    assert_eq!(
        resolve_domain(&props, &[], AxisKind::X),
        Bounds::new(0.0, 2.0)
    );
}

#[test]
fn x_domain_spans_longest_series() {
    let series = vec![
        Series::from_values("a", &[1.0, 2.0, 3.0]),
        Series::from_values("b", &[1.0, 2.0, 3.0, 4.0, 5.0]),
    ];

    assert_eq!(
        resolve_domain(&AxisConfigProps::new(), &series, AxisKind::X),
        Bounds::new(0.0, 4.0)
    );
}

#[test]
fn y_domain_covers_ranges_and_skips_gaps() {
    let series = vec![Series::new(
        "a",
        vec![Some(DataValue::range(-2.0, 4.0)), None, Some(6.0.into())],
    )];

    assert_eq!(
        resolve_domain(&AxisConfigProps::new(), &series, AxisKind::Y),
        Bounds::new(-2.0, 6.0)
    );
}

#[test]
fn y_domain_accounts_for_stacked_totals() {
    let series = vec![
        Series::from_values("a", &[1.0, 2.0]).with_stack_id("total"),
        Series::from_values("b", &[3.0, 4.0]).with_stack_id("total"),
    ];

    assert_eq!(
        resolve_domain(&AxisConfigProps::new(), &series, AxisKind::Y),
        Bounds::new(0.0, 6.0)
    );
}

#[test]
fn unresolved_sides_default_to_zero() {
    assert_eq!(
        resolve_domain(&AxisConfigProps::new(), &[], AxisKind::Y),
        Bounds::new(0.0, 0.0)
    );

    let props = AxisConfigProps::new().with_domain(PartialBounds::max(50.0));
    assert_eq!(
        resolve_domain(&props, &[], AxisKind::Y),
        Bounds::new(0.0, 50.0)
    );
}

#[test]
fn ranges_follow_the_drawing_rect() {
    let props = AxisConfigProps::new();
    assert_eq!(
        resolve_range(&props, rect(), AxisKind::X),
        Bounds::new(10.0, 210.0)
    );
    assert_eq!(
        resolve_range(&props, rect(), AxisKind::Y),
        Bounds::new(20.0, 120.0)
    );

    let props = AxisConfigProps::new().with_range(PartialBounds::max(150.0));
    assert_eq!(
        resolve_range(&props, rect(), AxisKind::X),
        Bounds::new(10.0, 150.0)
    );
}

#[test]
fn resolved_y_axis_builds_inverted_nice_scale() {
    let series = vec![Series::from_values("a", &[0.3, 9.2])];
    let config = AxisConfig::resolve(&AxisConfigProps::new(), &series, rect(), AxisKind::Y);

    assert_eq!(config.domain_limit, DomainLimit::Nice);
    let scale = config.build_scale().expect("valid scale");
    assert_eq!(scale.domain(), Bounds::new(0.0, 10.0));
    assert_eq!(scale.range(), Bounds::new(120.0, 20.0));
}

#[test]
fn strict_x_axis_keeps_exact_domain() {
    let series = vec![Series::from_values("a", &[1.0, 2.0, 3.0, 4.0])];
    let config = AxisConfig::resolve(&AxisConfigProps::new(), &series, rect(), AxisKind::X);

    assert_eq!(config.domain_limit, DomainLimit::Strict);
    let scale = config.build_scale().expect("valid scale");
    assert_eq!(scale.domain(), Bounds::new(0.0, 3.0));
    assert_eq!(scale.range(), Bounds::new(10.0, 210.0));
}

#[test]
fn band_axis_config_builds_band_scale() {
    let labels = vec!["a".to_owned(), "b".to_owned()];
    let props = AxisConfigProps::new()
        .with_scale_type(ScaleType::Band)
        .with_data(AxisData::Labels(labels))
        .with_category_padding(0.0);
    let config = AxisConfig::resolve(&props, &[], rect(), AxisKind::X);

    assert_eq!(config.labels().map(<[String]>::len), Some(2));
    let scale = config.build_scale().expect("valid band scale");
    let band = scale.as_band().expect("band scale");
    assert_eq!(band.bandwidth(), 100.0);
}

#[test]
fn log_axis_over_non_positive_domain_fails() {
    let series = vec![Series::from_values("a", &[0.0, 10.0])];
    let props = AxisConfigProps::new().with_scale_type(ScaleType::Log);
    let config = AxisConfig::resolve(&props, &series, rect(), AxisKind::Y);

    assert!(matches!(
        config.build_scale(),
        Err(ChartError::InvalidDomain { .. })
    ));
}

#[test]
fn axis_props_deserialize_from_json() {
    let props: AxisConfigProps = serde_json::from_str(
        r#"{"id":"left","scale_type":"band","data":["a","b","c"],"domain":{"min":1}}"#,
    )
    .expect("parse axis props");

    assert_eq!(props.id.as_deref(), Some("left"));
    assert_eq!(props.scale_type, Some(ScaleType::Band));
    assert_eq!(
        props.domain,
        Some(BoundsOverride::Bounds(PartialBounds::min(1.0)))
    );
    assert_eq!(
        resolve_domain(&props, &[], AxisKind::X),
        Bounds::new(1.0, 2.0)
    );
}
