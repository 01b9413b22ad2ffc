use serde::Deserialize;

/// Top-level configuration settings for the relay.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub queue: QueueSettings,
    pub log: LogSettings,
}

/// Configuration settings for the WebSocket server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the durable queue and the retry policy.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueSettings {
    /// Filesystem path of the sled database.
    pub path: String,
    /// Base queue name; retry and dead-letter lists derive from it.
    pub name: String,
    /// Retries granted to a message before it dead-letters.
    pub max_retries: u32,
    /// Bound, in seconds, on the blocking pop of the primary queue.
    pub pop_timeout_secs: u64,
    /// Treat a broadcast that reached zero subscribers as a failure.
    pub retry_on_no_subscribers: bool,
    /// Require payloads to parse as JSON before broadcasting.
    pub require_json_payload: bool,
}

/// Logging settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration loaded from files or environment.
///
/// Allows partial specification; missing values fall back to defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub queue: Option<PartialQueueSettings>,
    pub log: Option<PartialLogSettings>,
}

/// Partial server settings.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial queue settings.
#[derive(Debug, Deserialize)]
pub struct PartialQueueSettings {
    pub path: Option<String>,
    pub name: Option<String>,
    pub max_retries: Option<u32>,
    pub pop_timeout_secs: Option<u64>,
    pub retry_on_no_subscribers: Option<bool>,
    pub require_json_payload: Option<bool>,
}

/// Partial logging settings.
#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Ensures the relay has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            queue: QueueSettings {
                path: "relayq_db".to_string(),
                name: "relayq".to_string(),
                max_retries: 3,
                pop_timeout_secs: 5,
                retry_on_no_subscribers: false,
                require_json_payload: false,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
