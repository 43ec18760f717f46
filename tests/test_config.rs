use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use hygro::config::Config;
use hygro::http::connection::SEND_BUFFER_CAPACITY;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.server.bind_addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    assert_eq!(cfg.server.port, None);
    assert_eq!(cfg.server.backlog, 1);
    assert_eq!(cfg.server.send_buffer_capacity, SEND_BUFFER_CAPACITY);
    assert_eq!(cfg.server.idle_timeout(), Some(Duration::from_secs(10)));
    assert_eq!(cfg.sensor.interval(), Duration::from_secs(2));
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml(
        "server:\n  bind_addr: 127.0.0.1\n  port: 8080\n  idle_timeout_ms: 500\nsensor:\n  interval_ms: 250\n",
    )
    .unwrap();

    assert_eq!(cfg.server.bind_addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(cfg.server.port, Some(8080));
    assert_eq!(cfg.server.backlog, 1);
    assert_eq!(cfg.server.idle_timeout(), Some(Duration::from_millis(500)));
    assert_eq!(cfg.sensor.interval_ms, 250);
}

#[test]
fn test_config_null_idle_timeout_disables_reaper() {
    let cfg = Config::from_yaml("server:\n  idle_timeout_ms: ~\n").unwrap();

    assert_eq!(cfg.server.idle_timeout(), None);
}

#[test]
fn test_config_empty_document_uses_defaults() {
    let cfg = Config::from_yaml("{}").unwrap();

    assert_eq!(cfg.server.port, None);
    assert_eq!(cfg.sensor.interval_ms, 2_000);
}

#[test]
fn test_config_rejects_tiny_send_buffer() {
    let result = Config::from_yaml("server:\n  send_buffer_capacity: 16\n");

    assert!(result.is_err());
}

#[test]
fn test_config_rejects_zero_backlog() {
    assert!(Config::from_yaml("server:\n  backlog: 0\n").is_err());
}

#[test]
fn test_config_rejects_unknown_address() {
    assert!(Config::from_yaml("server:\n  bind_addr: not-an-ip\n").is_err());
}

#[test]
fn test_config_load_from_env() {
    let path = std::env::temp_dir().join(format!("hygro-test-{}.yaml", std::process::id()));
    std::fs::write(&path, "server:\n  port: 8081\nsensor:\n  interval_ms: 100\n").unwrap();

    unsafe {
        std::env::set_var("HYGRO_CONFIG", &path);
        std::env::remove_var("HYGRO_PORT");
    }
    let from_file = Config::load().unwrap();

    unsafe {
        std::env::set_var("HYGRO_PORT", "9090");
    }
    let overridden = Config::load().unwrap();

    unsafe {
        std::env::set_var("HYGRO_PORT", "not-a-port");
    }
    let invalid = Config::load();

    unsafe {
        std::env::remove_var("HYGRO_CONFIG");
        std::env::remove_var("HYGRO_PORT");
    }
    let _ = std::fs::remove_file(&path);

    assert_eq!(from_file.server.port, Some(8081));
    assert_eq!(from_file.sensor.interval_ms, 100);
    assert_eq!(overridden.server.port, Some(9090));
    assert_eq!(overridden.sensor.interval_ms, 100);
    assert!(invalid.is_err());
}
