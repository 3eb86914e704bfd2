//! Benchmarks for figure rendering.
//!
//! Run with: cargo bench --package renderer --bench figure_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use projection::ChannelGeometry;
use qg_common::{GridShape, Variable};
use renderer::{compute_color_scales, FigureRenderer, FigureSpec, RenderConfig, WindOverlay};
use test_utils::{create_altitudes, create_jet_streamfunction, create_uniform_wind};

fn bench_color_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("color_scales");
    for &frames in &[1usize, 10, 40] {
        let shape = GridShape::new(2, 64, 128);
        let fields: Vec<_> = (0..frames)
            .map(|f| create_jet_streamfunction(shape, 1.0e7 * (1.0 + f as f64), 2.0))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(frames), &fields, |b, fields| {
            b.iter(|| compute_color_scales(black_box(fields), 30).unwrap())
        });
    }
    group.finish();
}

fn bench_render_figure(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_figure");
    group.sample_size(10);

    for &dpi in &[75.0f32, 150.0, 300.0] {
        let shape = GridShape::new(2, 64, 128);
        let field = create_jet_streamfunction(shape, 1.0e7, 2.0);
        let (u, v) = create_uniform_wind(shape, 30.0, 10.0);
        let scales = compute_color_scales([&field], 30).unwrap();
        let geometry = ChannelGeometry::new(shape);
        let altitudes = create_altitudes(shape.nz);
        let renderer = FigureRenderer::new(RenderConfig {
            dpi,
            ..RenderConfig::default()
        })
        .unwrap();
        let spec = FigureSpec {
            variable: Variable::Streamfunction,
            field: &field,
            wind: Some(WindOverlay { u: &u, v: &v }),
            scales: &scales,
            geometry: &geometry,
            altitudes: &altitudes,
            increment: false,
        };

        group.bench_with_input(BenchmarkId::new("dpi", dpi as u32), &spec, |b, spec| {
            b.iter(|| renderer.render(black_box(spec)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_color_scales, bench_render_figure);
criterion_main!(benches);
