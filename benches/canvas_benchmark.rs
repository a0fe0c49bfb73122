//! Canvas benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use doodle_canvas::brush::{BrushEngine, BrushSettings, Tool};
use doodle_canvas::codec::{decode_payload, encode_surface_payload};
use doodle_canvas::color::Color;
use doodle_canvas::fill::flood_fill;
use doodle_canvas::surface::{PixelSurface, Point};

fn generate_stroke(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            Point::new(
                t * 754.0,
                (t * std::f32::consts::PI * 4.0).sin() * 150.0 + 200.0,
            )
        })
        .collect()
}

fn benchmark_stroke_drawing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stroke Drawing");

    for width in [1u32, 4, 20].iter() {
        let points = generate_stroke(200);
        let settings = BrushSettings::new(Tool::Brush, Color::BLACK, *width);

        group.bench_with_input(BenchmarkId::new("width", width), &points, |b, points| {
            b.iter(|| {
                let mut surface = PixelSurface::new(754, 400);
                let mut engine = BrushEngine::new();
                engine.begin(points[0], &settings);
                for point in &points[1..] {
                    engine.extend(&mut surface, *point);
                }
                engine.end();
            })
        });
    }

    group.finish();
}

fn benchmark_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("Flood Fill");

    // Whole uniform canvas
    group.bench_function("uniform_754x400", |b| {
        b.iter(|| {
            let mut surface = PixelSurface::new(754, 400);
            flood_fill(&mut surface, 377, 200, Color::rgb(255, 0, 0))
        })
    });

    // Region split by a stroke
    let mut split = PixelSurface::new(754, 400);
    split.draw_line_segment(
        Point::new(0.0, 200.0),
        Point::new(754.0, 200.0),
        Color::BLACK.to_rgba(),
        4.0,
    );
    group.bench_function("half_754x400", |b| {
        b.iter(|| {
            let mut surface = split.clone();
            flood_fill(&mut surface, 10, 10, Color::rgb(0, 0, 255))
        })
    });

    group.finish();
}

fn benchmark_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("Wire Payload");

    let mut surface = PixelSurface::new(754, 400);
    let settings = BrushSettings::default();
    let mut engine = BrushEngine::new();
    let points = generate_stroke(200);
    engine.begin(points[0], &settings);
    for point in &points[1..] {
        engine.extend(&mut surface, *point);
    }
    engine.end();

    group.bench_function("encode", |b| {
        b.iter(|| encode_surface_payload(&surface))
    });

    if let Ok(payload) = encode_surface_payload(&surface) {
        group.bench_function("decode", |b| b.iter(|| decode_payload(&payload)));
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_stroke_drawing,
    benchmark_flood_fill,
    benchmark_payload
);
criterion_main!(benches);
