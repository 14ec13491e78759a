use super::*;

#[test]
fn route_picks_the_initial_tab() {
    assert_eq!(InputTab::for_path("/file-upload"), InputTab::File);
    assert_eq!(InputTab::for_path("/file-upload/"), InputTab::File);
    assert_eq!(InputTab::for_path("/urlmodel-test"), InputTab::Url);
}

#[test]
fn pretty_json_indents_objects() {
    let value = serde_json::json!({"cat": 0.9});
    assert_eq!(pretty_json(&value), "{\n  \"cat\": 0.9\n}");
}
