use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn app_config_defaults_to_memory_store() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, AppConfig { port: DEFAULT_PORT, store: StoreBackend::Memory });
}

#[test]
fn app_config_uses_postgres_when_database_url_set() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://u:p@db/geodraw"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("PORT", "8080"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(
        cfg.store,
        StoreBackend::Postgres { database_url: "postgres://u:p@db/geodraw".into(), max_connections: 12 }
    );
}

#[test]
fn app_config_blank_database_url_means_memory() {
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
    assert_eq!(cfg.store, StoreBackend::Memory);
}

#[test]
fn app_config_bad_max_connections_falls_back() {
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://x"), ("DB_MAX_CONNECTIONS", "lots")])).unwrap();
    assert_eq!(
        cfg.store,
        StoreBackend::Postgres { database_url: "postgres://x".into(), max_connections: DEFAULT_DB_MAX_CONNECTIONS }
    );
}

#[test]
fn app_config_rejects_invalid_port() {
    let err = AppConfig::from_lookup(lookup(&[("PORT", "99999")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "99999".into() });
}

#[test]
fn client_config_defaults() {
    let cfg = ClientConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg.base_url, DEFAULT_DRAWINGS_API_URL);
    assert_eq!(
        cfg.timeouts,
        HttpTimeouts {
            request_secs: DEFAULT_DRAWINGS_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_DRAWINGS_CONNECT_TIMEOUT_SECS
        }
    );
}

#[test]
fn client_config_overrides_and_trims_trailing_slash() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("DRAWINGS_API_URL", "https://draw.example.test/"),
        ("DRAWINGS_REQUEST_TIMEOUT_SECS", "4"),
        ("DRAWINGS_CONNECT_TIMEOUT_SECS", "1"),
    ]));
    assert_eq!(cfg.base_url, "https://draw.example.test");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 4, connect_secs: 1 });
}
