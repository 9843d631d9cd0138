use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_host_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("BACKEND_URL");
        std::env::remove_var("BACKEND_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_uses_defaults() {
    unsafe { clear_host_env() };

    let cfg = HostConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, None);
    assert_eq!(cfg.backend_timeout, Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS));
}

#[test]
fn from_env_reads_overrides() {
    unsafe {
        clear_host_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BACKEND_URL", "https://api.example.test/");
        std::env::set_var("BACKEND_TIMEOUT_SECS", "5");
    }

    let cfg = HostConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url.as_deref(), Some("https://api.example.test"));
    assert_eq!(cfg.backend_timeout, Duration::from_secs(5));

    unsafe { clear_host_env() };
}

#[test]
fn parse_port_rejects_garbage() {
    assert_eq!(parse_port(Some("http")), Err(ConfigError::InvalidPort("http".into())));
    assert_eq!(parse_port(Some("70000")), Err(ConfigError::InvalidPort("70000".into())));
    assert_eq!(parse_port(Some(" ")), Ok(DEFAULT_PORT));
}

#[test]
fn parse_backend_url_requires_http_scheme() {
    assert_eq!(parse_backend_url(None), Ok(None));
    assert_eq!(parse_backend_url(Some("")), Ok(None));
    assert_eq!(
        parse_backend_url(Some("api.example.test")),
        Err(ConfigError::InvalidBackendUrl("api.example.test".into()))
    );
    assert_eq!(
        parse_backend_url(Some("http://localhost:4000//")),
        Ok(Some("http://localhost:4000".into()))
    );
}

#[test]
fn parse_timeout_rejects_zero_and_text() {
    assert_eq!(parse_timeout(Some("0")), Err(ConfigError::InvalidTimeout("0".into())));
    assert_eq!(parse_timeout(Some("soon")), Err(ConfigError::InvalidTimeout("soon".into())));
    assert_eq!(parse_timeout(Some("12")), Ok(Duration::from_secs(12)));
}
