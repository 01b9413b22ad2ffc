use serial_test::serial;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.queue.path, "relayq_db");
    assert_eq!(settings.queue.name, "relayq");
    assert_eq!(settings.queue.max_retries, 3);
    assert_eq!(settings.queue.pop_timeout_secs, 5);
    assert!(!settings.queue.retry_on_no_subscribers);
    assert!(!settings.queue.require_json_payload);
    assert_eq!(settings.log.level, "info");
}

#[test]
#[serial]
fn test_load_config_falls_back_to_defaults() {
    let settings = load_config().expect("Failed to load configuration");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.queue.max_retries, 3);
}

#[test]
#[serial]
fn test_env_overrides_server_port() {
    temp_env::with_var("SERVER_PORT", Some("9100"), || {
        let settings = load_config().expect("Failed to load configuration");
        assert_eq!(settings.server.port, 9100);
    });
}

#[test]
#[serial]
fn test_env_overrides_log_level() {
    temp_env::with_var("LOG_LEVEL", Some("debug"), || {
        let settings = load_config().expect("Failed to load configuration");
        assert_eq!(settings.log.level, "debug");
    });
}

#[test]
#[serial]
fn test_env_overrides_queue_name() {
    temp_env::with_var("QUEUE_NAME", Some("orders"), || {
        let settings = load_config().expect("Failed to load configuration");
        assert_eq!(settings.queue.name, "orders");
    });
}
