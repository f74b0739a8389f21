use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, ApiConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_POKEAPI_BASE_URL);
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: None, connect_secs: None });
    assert_eq!(cfg.storage_key, "sektor");
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ApiConfig::from_lookup(lookup_from(&[
        ("POKEAPI_BASE_URL", "http://localhost:8080/api/v2/"),
        ("HTTP_REQUEST_TIMEOUT_SECS", "30"),
        ("HTTP_CONNECT_TIMEOUT_SECS", " 5 "),
        ("SEKTOR_STORAGE_KEY", "sektor-test"),
        ("SEKTOR_STORAGE_DIR", "/tmp/dexkit"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8080/api/v2");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: Some(30), connect_secs: Some(5) });
    assert_eq!(cfg.storage_key, "sektor-test");
    assert_eq!(cfg.storage_dir, PathBuf::from("/tmp/dexkit"));
}

#[test]
fn from_lookup_rejects_non_numeric_timeout() {
    let err = ApiConfig::from_lookup(lookup_from(&[("HTTP_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidNumber { var: "HTTP_REQUEST_TIMEOUT_SECS".into(), value: "soon".into() }
    );
    assert!(err.to_string().contains("HTTP_REQUEST_TIMEOUT_SECS"));
}

#[test]
fn from_lookup_rejects_empty_storage_key() {
    let err = ApiConfig::from_lookup(lookup_from(&[("SEKTOR_STORAGE_KEY", "  ")])).unwrap_err();
    assert!(matches!(err, ConfigError::Empty { ref var } if var == "SEKTOR_STORAGE_KEY"));
}
