use super::*;

#[test]
fn split_percent_tracks_pointer_position() {
    assert!((split_percent(300.0, 100.0, 400.0) - 50.0).abs() < f64::EPSILON);
    assert!((split_percent(200.0, 100.0, 400.0) - 25.0).abs() < f64::EPSILON);
}

#[test]
fn split_percent_clamps_to_pane_bounds() {
    assert!((split_percent(0.0, 100.0, 400.0) - 10.0).abs() < f64::EPSILON);
    assert!((split_percent(900.0, 100.0, 400.0) - 90.0).abs() < f64::EPSILON);
}

#[test]
fn split_percent_centers_on_zero_width() {
    assert!((split_percent(42.0, 0.0, 0.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn limits_text_joins_pairs() {
    assert_eq!(limits_text(&serde_json::json!([0.1, 0.9])), "0.1 - 0.9");
    assert_eq!(limits_text(&serde_json::json!("open")), "\"open\"");
}
