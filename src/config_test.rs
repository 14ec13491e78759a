use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_when_unset() {
    let cfg = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.backend_timeout, Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS));
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
}

#[test]
fn overrides_are_parsed_and_trailing_slash_trimmed() {
    let cfg = HostConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("BACKEND_URL", "https://ml.internal:9000/"),
        ("BACKEND_TIMEOUT_SECS", "5"),
        ("MAX_UPLOAD_BYTES", "1024"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://ml.internal:9000");
    assert_eq!(cfg.backend_timeout, Duration::from_secs(5));
    assert_eq!(cfg.max_upload_bytes, 1024);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = HostConfig::from_lookup(lookup(&[("PORT", " "), ("BACKEND_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
}

#[test]
fn malformed_port_is_rejected() {
    let err = HostConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });
}

#[test]
fn non_http_backend_is_rejected() {
    let err = HostConfig::from_lookup(lookup(&[("BACKEND_URL", "ftp://files")])).unwrap_err();
    assert!(matches!(err, ConfigError::BackendUrl(_)));
    assert!(HostConfig::from_lookup(lookup(&[("BACKEND_URL", "localhost:5000")])).is_err());
}
