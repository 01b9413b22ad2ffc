mod settings;

use config::{Config, ConfigError, Environment, File};

use crate::config::settings::PartialSettings;

pub use settings::{LogSettings, QueueSettings, ServerSettings, Settings};

#[cfg(test)]
mod tests;

/// Loads the configuration from the default file and environment variables,
/// merged over built-in defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Deserialize what is available and fill the rest per-field.
    let partial: PartialSettings = config.try_deserialize()?;

    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        queue: QueueSettings {
            path: partial
                .queue
                .as_ref()
                .and_then(|q| q.path.clone())
                .unwrap_or(default.queue.path),
            name: partial
                .queue
                .as_ref()
                .and_then(|q| q.name.clone())
                .unwrap_or(default.queue.name),
            max_retries: partial
                .queue
                .as_ref()
                .and_then(|q| q.max_retries)
                .unwrap_or(default.queue.max_retries),
            pop_timeout_secs: partial
                .queue
                .as_ref()
                .and_then(|q| q.pop_timeout_secs)
                .unwrap_or(default.queue.pop_timeout_secs),
            retry_on_no_subscribers: partial
                .queue
                .as_ref()
                .and_then(|q| q.retry_on_no_subscribers)
                .unwrap_or(default.queue.retry_on_no_subscribers),
            require_json_payload: partial
                .queue
                .as_ref()
                .and_then(|q| q.require_json_payload)
                .unwrap_or(default.queue.require_json_payload),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    })
}
