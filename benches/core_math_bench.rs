use chart_geom::CartesianChart;
use chart_geom::core::{
    Bounds, CurveType, DataValue, DrawingRect, NumericScaleKind, Scale, Series, SeriesPoint,
    TickConfig, build_area_path, build_line_path, build_numeric_scale, generate_ticks,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = build_numeric_scale(
        Bounds::new(0.0, 10_000.0),
        Bounds::new(0.0, 1920.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_tick_interval_generation(c: &mut Criterion) {
    let scale: Scale = build_numeric_scale(
        Bounds::new(0.0, 250_000.0),
        Bounds::new(0.0, 1920.0),
        NumericScaleKind::Linear,
    )
    .expect("valid scale")
    .into();
    let config = TickConfig::new().with_tick_interval(80.0);

    c.bench_function("tick_interval_generation", |b| {
        b.iter(|| {
            let _ = generate_ticks(black_box(&scale), black_box(&config));
        })
    });
}

fn wave(len: usize) -> Vec<SeriesPoint> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            (i % 97 != 0).then(|| DataValue::from(100.0 + (t * 0.05).sin() * 40.0))
        })
        .collect()
}

fn bench_paths_10k(c: &mut Criterion) {
    let points = wave(10_000);
    let x: Scale = build_numeric_scale(
        Bounds::new(0.0, 9_999.0),
        Bounds::new(0.0, 1920.0),
        NumericScaleKind::Linear,
    )
    .expect("valid x scale")
    .into();
    let y: Scale = build_numeric_scale(
        Bounds::new(0.0, 200.0),
        Bounds::new(1080.0, 0.0),
        NumericScaleKind::Linear,
    )
    .expect("valid y scale")
    .into();

    c.bench_function("line_path_monotone_10k", |b| {
        b.iter(|| {
            let _ = build_line_path(black_box(&points), &x, &y, CurveType::Monotone, None);
        })
    });

    c.bench_function("area_path_linear_10k", |b| {
        b.iter(|| {
            let _ = build_area_path(black_box(&points), &x, &y, CurveType::Linear, None);
        })
    });
}

fn bench_chart_frame_stacked(c: &mut Criterion) {
    let chart = (0..8).fold(
        CartesianChart::new(DrawingRect::new(0.0, 0.0, 1920.0, 1080.0)),
        |chart, index| {
            chart.with_series(Series::new(format!("s{index}"), wave(2_000)).with_stack_id("total"))
        },
    );

    c.bench_function("chart_frame_stacked_8x2k", |b| {
        b.iter(|| {
            let _ = black_box(&chart).frame().expect("frame should resolve");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_tick_interval_generation,
    bench_paths_10k,
    bench_chart_frame_stacked
);
criterion_main!(benches);
