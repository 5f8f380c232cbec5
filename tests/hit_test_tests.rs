use parcoords_rs::api::{CentroidSource, ChartAdapter, ParcoordsConfig, hit_test_lines};
use parcoords_rs::core::{CellValue, DataSet, PixelPoint, Row, RowId, Viewport};
use parcoords_rs::interaction::BrushExtent;

fn abc_dataset() -> DataSet {
    let rows = [(1.0, 1.0, 3.0), (2.0, 5.0, 2.0), (3.0, 10.0, 1.0)]
        .into_iter()
        .map(|(a, b, c)| {
            let mut row = Row::new();
            row.insert("A".to_owned(), CellValue::Number(a));
            row.insert("B".to_owned(), CellValue::Number(b));
            row.insert("C".to_owned(), CellValue::Number(c));
            row
        })
        .collect();
    DataSet::new(rows).expect("dataset")
}

fn adapter() -> ChartAdapter {
    let config = ParcoordsConfig::new(Viewport::new(600, 300));
    ChartAdapter::from_config(abc_dataset(), &config).expect("adapter")
}

fn midpoint(a: PixelPoint, b: PixelPoint) -> PixelPoint {
    PixelPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[test]
fn click_on_middle_row_segment_hits_exactly_that_row() {
    let adapter = adapter();
    let centroids = adapter.centroids(RowId(1)).expect("centroids");
    let click = midpoint(centroids[0], centroids[1]);

    let hit = hit_test_lines(&adapter, click, 2.0).expect("hit-test");
    assert_eq!(hit.segment, Some(0));
    assert_eq!(hit.rows.as_slice(), &[RowId(1)]);
    assert_eq!(hit.centroids, vec![centroids]);
}

#[test]
fn clicks_outside_axis_range_hit_nothing() {
    let adapter = adapter();
    let axes = adapter.axis_positions();
    let first = axes[0];
    let last = axes[axes.len() - 1];

    for x in [first - 0.5, last + 0.5, 0.0, 600.0] {
        let hit = hit_test_lines(&adapter, PixelPoint::new(x, 150.0), 2.0).expect("hit-test");
        assert!(hit.is_empty());
        assert_eq!(hit.segment, None);
    }
}

#[test]
fn background_click_inside_range_reports_segment_without_rows() {
    let adapter = adapter();
    let c0 = adapter.centroids(RowId(0)).expect("row 0");
    let c1 = adapter.centroids(RowId(1)).expect("row 1");
    // Halfway between the bottom line and the middle line on the first segment.
    let point = midpoint(midpoint(c0[0], c0[1]), midpoint(c1[0], c1[1]));

    let hit = hit_test_lines(&adapter, point, 2.0).expect("hit-test");
    assert_eq!(hit.segment, Some(0));
    assert!(hit.is_empty());
}

#[test]
fn perpendicular_offset_beyond_tolerance_misses() {
    let adapter = adapter();
    let centroids = adapter.centroids(RowId(1)).expect("centroids");
    let (start, end) = (centroids[0], centroids[1]);
    let mid = midpoint(start, end);
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length = dx.hypot(dy);
    let (nx, ny) = (-dy / length, dx / length);

    let near = mid.offset(nx * 1.5, ny * 1.5);
    let far = mid.offset(nx * 3.0, ny * 3.0);
    assert_eq!(
        hit_test_lines(&adapter, near, 2.0).expect("near").rows.as_slice(),
        &[RowId(1)]
    );
    assert!(hit_test_lines(&adapter, far, 2.0).expect("far").is_empty());
}

#[test]
fn hit_test_only_considers_brushed_rows() {
    let mut adapter = adapter();
    let centroids = adapter.centroids(RowId(1)).expect("centroids");
    let click = midpoint(centroids[0], centroids[1]);

    // Top third of axis B keeps only row 2 (B = 10).
    let inner_height = adapter.inner_height();
    adapter
        .set_brush("B", BrushExtent::new(0.0, inner_height / 3.0).expect("extent"))
        .expect("brush");
    assert_eq!(adapter.active_rows().expect("active"), vec![RowId(2)]);
    assert!(hit_test_lines(&adapter, click, 2.0).expect("hit-test").is_empty());
}

#[test]
fn overlapping_lines_are_all_reported() {
    let rows = (0..3)
        .map(|_| {
            let mut row = Row::new();
            row.insert("A".to_owned(), CellValue::Number(1.0));
            row.insert("B".to_owned(), CellValue::Number(2.0));
            row
        })
        .collect();
    let dataset = DataSet::new(rows).expect("dataset");
    let config = ParcoordsConfig::new(Viewport::new(400, 200));
    let adapter = ChartAdapter::from_config(dataset, &config).expect("adapter");
    let centroids = adapter.centroids(RowId(0)).expect("centroids");

    let hit = hit_test_lines(&adapter, midpoint(centroids[0], centroids[1]), 2.0).expect("hit");
    assert_eq!(hit.rows.as_slice(), &[RowId(0), RowId(1), RowId(2)]);
    assert_eq!(hit.centroids.len(), 3);
}
