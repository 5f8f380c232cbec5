use parcoords_rs::ChartError;
use parcoords_rs::api::{ColorScaleConfig, ParcoordsConfig, ParcoordsSession};
use parcoords_rs::core::{CellValue, DataSet, Row, RowId, Viewport};
use parcoords_rs::interaction::InteractionEvent;
use parcoords_rs::render::{Color, FontWeight, NullRenderer};

fn dataset(b_values: [CellValue; 3]) -> DataSet {
    let rows = b_values
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            let mut row = Row::new();
            row.insert("A".to_owned(), CellValue::Text(format!("r{i}")));
            row.insert("B".to_owned(), b);
            row.insert("C".to_owned(), CellValue::Number(i as f64));
            row
        })
        .collect();
    DataSet::new(rows).expect("dataset")
}

fn session(b_values: [CellValue; 3]) -> ParcoordsSession<NullRenderer> {
    let config = ParcoordsConfig::new(Viewport::new(640, 320));
    ParcoordsSession::new(NullRenderer::default(), dataset(b_values), config).expect("session")
}

fn numeric_session() -> ParcoordsSession<NullRenderer> {
    session([1.0.into(), 5.0.into(), 10.0.into()])
}

#[test]
fn coloring_by_b_maps_extremes_to_scale_stops() {
    let mut session = numeric_session();
    let config = ColorScaleConfig::default();

    let outcome = session
        .dispatch(InteractionEvent::AxisClicked {
            dimension: "B".to_owned(),
        })
        .expect("axis click");
    assert!(outcome.recolored);

    let adapter = session.adapter();
    assert_eq!(adapter.line_color(RowId(0)).expect("row 0"), config.start);
    assert_eq!(adapter.line_color(RowId(2)).expect("row 2"), config.end);
    let middle = adapter.line_color(RowId(1)).expect("row 1");
    assert_ne!(middle, config.start);
    assert_ne!(middle, config.end);
    assert_eq!(session.color_scale().domain(), Some((1.0, 10.0)));
    assert_eq!(session.color_dimension(), Some("B"));
}

#[test]
fn recoloring_twice_is_idempotent() {
    let mut session = numeric_session();
    session.recolor_by_dimension("B").expect("first");
    let first: Vec<Color> = session.adapter().line_colors().to_vec();
    session.recolor_by_dimension("B").expect("second");
    assert_eq!(session.adapter().line_colors(), first.as_slice());
}

#[test]
fn session_starts_colored_by_third_column() {
    let session = numeric_session();
    assert_eq!(session.color_dimension(), Some("C"));
    assert_eq!(session.adapter().bold_dimension(), Some("C"));
    assert_eq!(session.color_scale().domain(), Some((0.0, 2.0)));
}

#[test]
fn configured_initial_dimension_wins() {
    let config = ParcoordsConfig::new(Viewport::new(640, 320)).with_initial_color_dimension("B");
    let session = ParcoordsSession::new(
        NullRenderer::default(),
        dataset([1.0.into(), 5.0.into(), 10.0.into()]),
        config,
    )
    .expect("session");
    assert_eq!(session.color_dimension(), Some("B"));
}

#[test]
fn clicked_axis_label_is_the_only_bold_one() {
    let mut session = numeric_session();
    session.recolor_by_dimension("B").expect("recolor");
    let frame = session.build_render_frame().expect("frame");

    let bold: Vec<&str> = frame
        .texts
        .iter()
        .filter(|text| text.weight == FontWeight::Bold)
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(bold, vec!["B"]);
}

#[test]
fn unparseable_values_take_missing_color() {
    let mut session = session([1.0.into(), "n/a".into(), "7kg".into()]);
    let config = ColorScaleConfig::default();
    session.recolor_by_dimension("B").expect("recolor");

    let adapter = session.adapter();
    assert_eq!(session.color_scale().domain(), Some((1.0, 7.0)));
    assert_eq!(adapter.line_color(RowId(0)).expect("row 0"), config.start);
    assert_eq!(adapter.line_color(RowId(1)).expect("row 1"), config.missing);
    assert_eq!(adapter.line_color(RowId(2)).expect("row 2"), config.end);
}

#[test]
fn constant_column_maps_to_start_color() {
    let mut session = session([4.0.into(), 4.0.into(), 4.0.into()]);
    session.recolor_by_dimension("B").expect("recolor");
    let start = ColorScaleConfig::default().start;
    assert!(session.adapter().line_colors().iter().all(|&color| color == start));
}

#[test]
fn unknown_dimension_is_rejected_without_side_effects() {
    let mut session = numeric_session();
    let before = session.adapter().line_colors().to_vec();
    let err = session
        .dispatch(InteractionEvent::AxisClicked {
            dimension: "Z".to_owned(),
        })
        .expect_err("unknown dimension");
    assert!(matches!(err, ChartError::UnknownDimension(ref name) if name == "Z"));
    assert_eq!(session.adapter().line_colors(), before.as_slice());
    assert_eq!(session.color_dimension(), Some("C"));
}

#[test]
fn brushing_keeps_full_data_color_domain() {
    let mut session = numeric_session();
    session.recolor_by_dimension("B").expect("recolor");
    let height = session.adapter().inner_height();
    session
        .dispatch(InteractionEvent::BrushChanged {
            dimension: "B".to_owned(),
            extent: Some(
                parcoords_rs::interaction::BrushExtent::new(0.0, height / 4.0).expect("extent"),
            ),
        })
        .expect("brush");
    session.recolor_by_dimension("B").expect("recolor again");
    assert_eq!(session.color_scale().domain(), Some((1.0, 10.0)));
}
