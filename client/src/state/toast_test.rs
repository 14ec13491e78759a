use super::*;

#[test]
fn push_assigns_increasing_ids_and_dismiss_removes() {
    let mut toasts = ToastState::default();
    let a = toasts.push(ToastKind::Success, "Process Started");
    let b = toasts.push(ToastKind::Error, "Cannot Merge");
    assert!(b > a);
    toasts.dismiss(a);
    assert_eq!(toasts.items.len(), 1);
    assert_eq!(toasts.items[0].text, "Cannot Merge");
    assert_eq!(toasts.items[0].kind, ToastKind::Error);
}

#[test]
fn push_caps_visible_toasts() {
    let mut toasts = ToastState::default();
    for i in 0..8 {
        toasts.push(ToastKind::Info, format!("t{i}"));
    }
    assert_eq!(toasts.items.len(), MAX_VISIBLE);
    assert_eq!(toasts.items[0].text, "t3");
}

#[test]
fn dismiss_unknown_id_is_noop() {
    let mut toasts = ToastState::default();
    toasts.push(ToastKind::Warning, "No data to export");
    toasts.dismiss(99);
    assert_eq!(toasts.items.len(), 1);
}
