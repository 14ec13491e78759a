use super::*;

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn with_models() -> CatalogState {
    let mut state = CatalogState::default();
    state.set_catalog(ModelCatalog::Names(names(&["nsfw", "faces"])));
    state
}

#[test]
fn selecting_model_resets_version_and_requests_fetch() {
    let mut state = with_models();
    assert!(state.select_model(Some("nsfw".to_owned())));
    state.set_versions("nsfw", names(&["v1", "v2"]));
    state.select_version(Some("v2".to_owned()));
    assert_eq!(state.selection(), Some(("nsfw".to_owned(), "v2".to_owned())));

    assert!(state.select_model(Some("faces".to_owned())));
    assert_eq!(state.version, None);
    assert!(state.versions.is_empty());
    assert!(state.loading_versions);
}

#[test]
fn stale_version_replies_are_ignored() {
    let mut state = with_models();
    state.select_model(Some("nsfw".to_owned()));
    state.select_model(Some("faces".to_owned()));
    state.set_versions("nsfw", names(&["v1"]));
    assert!(state.versions.is_empty());
    assert!(state.loading_versions);
}

#[test]
fn embedded_versions_skip_fetch() {
    let mut state = CatalogState::default();
    let catalog: ModelCatalog = serde_json::from_value(serde_json::json!({"nsfw": ["v7"]})).unwrap();
    state.set_catalog(catalog);
    assert!(!state.select_model(Some("nsfw".to_owned())));
    assert_eq!(state.versions, names(&["v7"]));
}

#[test]
fn blank_model_clears_selection() {
    let mut state = with_models();
    state.select_model(Some("nsfw".to_owned()));
    assert!(!state.select_model(Some(String::new())));
    assert_eq!(state.model, None);
    assert_eq!(state.selection(), None);
}

#[test]
fn unknown_version_is_not_selected() {
    let mut state = with_models();
    state.select_model(Some("nsfw".to_owned()));
    state.set_versions("nsfw", names(&["v1"]));
    state.select_version(Some("v9".to_owned()));
    assert_eq!(state.version, None);
}

#[test]
fn preferred_model_applies_only_before_any_selection() {
    let mut state = CatalogState::default();
    assert!(!state.wants_preferred("nsfw"));

    state.set_catalog(ModelCatalog::Names(names(&["nsfw", "faces"])));
    assert!(state.wants_preferred("nsfw"));
    assert!(!state.wants_preferred("other"));

    state.select_model(Some("nsfw".to_owned()));
    assert!(!state.wants_preferred("nsfw"));

    state.select_model(None);
    assert_eq!(state.model, None);
    assert!(!state.wants_preferred("nsfw"));
}
