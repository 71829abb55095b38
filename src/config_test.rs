use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// # Safety
/// Callers must hold `env_guard()` so env mutations do not race.
unsafe fn clear_chat_env() {
    unsafe {
        std::env::remove_var(ENDPOINT_VAR);
        std::env::remove_var(REQUEST_TIMEOUT_VAR);
        std::env::remove_var(CONNECT_TIMEOUT_VAR);
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_guard();
    unsafe { clear_chat_env() };

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg, ChatConfig::default());
    assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
    assert!(cfg.timeouts.request().is_none());
    assert_eq!(cfg.timeouts.connect(), Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_guard();
    unsafe {
        clear_chat_env();
        std::env::set_var(ENDPOINT_VAR, "https://garage.example/ask");
        std::env::set_var(REQUEST_TIMEOUT_VAR, "30");
        std::env::set_var(CONNECT_TIMEOUT_VAR, "3");
    }

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg.endpoint, "https://garage.example/ask");
    assert_eq!(cfg.timeouts, QueryTimeouts { request_secs: Some(30), connect_secs: 3 });

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _guard = env_guard();
    unsafe {
        clear_chat_env();
        std::env::set_var(REQUEST_TIMEOUT_VAR, "soon");
    }

    let err = ChatConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::InvalidNumber { var: REQUEST_TIMEOUT_VAR, value: "soon".into() });

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_rejects_non_http_endpoint() {
    let _guard = env_guard();
    unsafe {
        clear_chat_env();
        std::env::set_var(ENDPOINT_VAR, "ftp://garage");
    }

    let err = ChatConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("invalid endpoint"));

    unsafe { clear_chat_env() };
}

#[test]
fn overrides_replace_only_given_values() {
    let cfg = ChatConfig::default()
        .with_overrides(ConfigOverrides {
            endpoint: Some("http://127.0.0.1:8080/".into()),
            request_timeout_secs: Some(5),
            connect_timeout_secs: None,
        })
        .unwrap();
    assert_eq!(cfg.endpoint, "http://127.0.0.1:8080/");
    assert_eq!(cfg.timeouts.request_secs, Some(5));
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn parse_endpoint_requires_host() {
    assert!(parse_endpoint("http://").is_err());
    assert!(parse_endpoint("localhost:5000").is_err());
    assert_eq!(parse_endpoint("  http://localhost:5000/ ").unwrap(), "http://localhost:5000/");
}
