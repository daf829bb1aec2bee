use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("SITE_ROOT");
    }
}

#[test]
fn from_env_defaults() {
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg, ServerConfig { port: DEFAULT_PORT, site_root: None });
    assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn from_env_reads_overrides() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("SITE_ROOT", "/srv/bms/site");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.site_root, Some(PathBuf::from("/srv/bms/site")));

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "not-a-port");
    }

    assert_eq!(ServerConfig::from_env(), Err(ConfigError::InvalidPort("not-a-port".to_owned())));

    unsafe { clear_server_env() };
}

#[test]
fn from_env_ignores_blank_site_root() {
    unsafe {
        clear_server_env();
        std::env::set_var("SITE_ROOT", "  ");
    }

    assert_eq!(ServerConfig::from_env().unwrap().site_root, None);

    unsafe { clear_server_env() };
}
