use parcoords_rs::api::{
    ParcoordsConfig, ParcoordsSession, SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshot,
};
use parcoords_rs::core::{DataSet, RowId, Viewport};
use parcoords_rs::interaction::{BrushExtent, InteractionEvent};
use parcoords_rs::render::NullRenderer;

fn brushed_session() -> ParcoordsSession<NullRenderer> {
    let dataset = DataSet::from_json_str(
        r#"[
            {"hive": "north", "visits": 10, "pollen": 2.5, "nectar": 7},
            {"hive": "south", "visits": 30, "pollen": 1.0, "nectar": 9},
            {"hive": "east", "visits": 20, "pollen": 4.0, "nectar": 3}
        ]"#,
    )
    .expect("dataset");
    let mut session = ParcoordsSession::new(
        NullRenderer::default(),
        dataset,
        ParcoordsConfig::new(Viewport::new(500, 265)),
    )
    .expect("session");
    session
        .dispatch(InteractionEvent::BrushChanged {
            dimension: "visits".to_owned(),
            extent: Some(BrushExtent::new(0.0, 100.0).expect("extent")),
        })
        .expect("brush");
    session.highlight_rows(&[RowId(2)]).expect("highlight");
    session
}

#[test]
fn snapshot_captures_selection_brushes_and_grid() {
    let snapshot = brushed_session().snapshot();

    assert_eq!(snapshot.dimensions, vec!["hive", "visits", "pollen", "nectar"]);
    assert_eq!(snapshot.color_dimension.as_deref(), Some("pollen"));
    assert_eq!(snapshot.color_domain, Some((1.0, 4.0)));
    assert_eq!(snapshot.active_rows, vec![RowId(1), RowId(2)]);
    assert_eq!(snapshot.pinned_rows, vec![RowId(2)]);
    assert!(snapshot.hovered_rows.is_empty());
    assert_eq!(snapshot.highlighted_rows, vec![RowId(2)]);
    assert_eq!(snapshot.tooltips.len(), 4);
    assert_eq!(snapshot.grid.visible_rows, vec![RowId(1), RowId(2)]);
    assert_eq!(snapshot.grid.styled_rows, vec![RowId(2)]);
    assert_eq!(snapshot.grid.cell_width_px, 240);

    // 265 px tall viewport leaves a 200 px plot: the brush covers visits 20..30.
    let brush = &snapshot.brushes[0];
    assert_eq!(brush.dimension, "visits");
    let (low, high) = brush.value_range.expect("value range");
    assert!((low - 20.0).abs() <= 1e-9);
    assert!((high - 30.0).abs() <= 1e-9);
}

#[test]
fn contract_v1_round_trips_and_accepts_bare_payload() {
    let snapshot = brushed_session().snapshot();
    let json = snapshot.to_json_contract_v1_pretty().expect("contract json");
    assert!(json.contains("\"schema_version\": 1"));
    assert_eq!(SESSION_SNAPSHOT_JSON_SCHEMA_V1, 1);

    let parsed = SessionSnapshot::from_json_compat_str(&json).expect("wrapped");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    let parsed = SessionSnapshot::from_json_compat_str(&bare).expect("bare");
    assert_eq!(parsed, snapshot);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let snapshot = brushed_session().snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract json")
        .replace("\"schema_version\": 1", "\"schema_version\": 2");
    assert!(SessionSnapshot::from_json_compat_str(&json).is_err());
    assert!(SessionSnapshot::from_json_compat_str("{\"nope\":true}").is_err());
}
