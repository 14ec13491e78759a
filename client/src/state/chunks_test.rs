use super::*;

fn chunk(file: &str, analyst: &str) -> ChunkSummary {
    ChunkSummary { file: file.to_owned(), analyst: analyst.to_owned(), status: "pending".to_owned() }
}

#[test]
fn assign_updates_locally_and_builds_request() {
    let mut state = ChunksState::default();
    state.set_items(vec![chunk("c1.csv", ""), chunk("c2.csv", "Ana")]);

    let request = state.assign("c1.csv", " Ben ").unwrap();
    assert_eq!(request, AssignAnalystRequest { analyst: "Ben".into(), chunk: "c1.csv".into() });
    assert_eq!(state.items[0].analyst, "Ben");
}

#[test]
fn assign_skips_unknown_chunks_and_no_ops() {
    let mut state = ChunksState::default();
    state.set_items(vec![chunk("c2.csv", "Ana")]);
    assert!(state.assign("missing.csv", "Ben").is_none());
    assert!(state.assign("c2.csv", "Ana").is_none());
    assert!(state.assign("c2.csv", "").is_none());
}

#[test]
fn merge_enabled_requires_permission_and_idle() {
    let mut state = ChunksState { can_merge: true, ..ChunksState::default() };
    assert!(state.merge_enabled());
    state.merging = true;
    assert!(!state.merge_enabled());
    state.merging = false;
    state.can_merge = false;
    assert!(!state.merge_enabled());
}
