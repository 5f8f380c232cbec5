use criterion::{Criterion, criterion_group, criterion_main};
use parcoords_rs::api::{ChartAdapter, ParcoordsConfig, ParcoordsSession, hit_test_lines};
use parcoords_rs::core::{CellValue, DataSet, PixelPoint, Row, Viewport};
use parcoords_rs::interaction::InteractionEvent;
use parcoords_rs::render::NullRenderer;
use std::hint::black_box;

fn synthetic_dataset(rows: usize) -> DataSet {
    let rows = (0..rows)
        .map(|i| {
            let t = i as f64;
            let mut row = Row::new();
            row.insert("name".to_owned(), CellValue::Text(format!("row-{i}")));
            row.insert("a".to_owned(), CellValue::Number((t * 0.37).sin() * 100.0));
            row.insert("b".to_owned(), CellValue::Number(t % 97.0));
            row.insert("c".to_owned(), CellValue::Number((t * 1.3).cos() * 50.0));
            row.insert("d".to_owned(), CellValue::Number(t));
            row
        })
        .collect();
    DataSet::new(rows).expect("synthetic dataset")
}

fn bench_hit_test_10k(c: &mut Criterion) {
    let config = ParcoordsConfig::new(Viewport::new(1600, 900));
    let adapter = ChartAdapter::from_config(synthetic_dataset(10_000), &config).expect("adapter");
    let point = PixelPoint::new(700.0, 450.0);

    c.bench_function("hit_test_10k", |b| {
        b.iter(|| {
            let _ = hit_test_lines(black_box(&adapter), black_box(point), black_box(2.0))
                .expect("hit-test should succeed");
        })
    });
}

fn bench_brush_dispatch_2k(c: &mut Criterion) {
    let config = ParcoordsConfig::new(Viewport::new(1600, 900));
    let mut session = ParcoordsSession::new(NullRenderer::default(), synthetic_dataset(2_000), config)
        .expect("session init");
    let extent = parcoords_rs::interaction::BrushExtent::new(100.0, 400.0).expect("extent");

    c.bench_function("brush_dispatch_2k", |b| {
        b.iter(|| {
            session
                .dispatch(InteractionEvent::BrushChanged {
                    dimension: "b".to_owned(),
                    extent: Some(black_box(extent)),
                })
                .expect("brush dispatch");
            session
                .dispatch(InteractionEvent::BrushesReset)
                .expect("reset dispatch");
        })
    });
}

fn bench_render_frame_2k(c: &mut Criterion) {
    let config = ParcoordsConfig::new(Viewport::new(1600, 900));
    let session = ParcoordsSession::new(NullRenderer::default(), synthetic_dataset(2_000), config)
        .expect("session init");

    c.bench_function("render_frame_2k", |b| {
        b.iter(|| {
            let _ = session.build_render_frame().expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_hit_test_10k,
    bench_brush_dispatch_2k,
    bench_render_frame_2k
);
criterion_main!(benches);
