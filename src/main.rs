use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use relayq::config::{Settings, load_config};
use relayq::queue::{QueueNames, SledQueue};
use relayq::registry::Registry;
use relayq::relay::{Relay, RetryPolicy};
use relayq::transport::websocket::start_websocket_server;
use relayq::utils::error::RelayError;
use relayq::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.log.level);

    if let Err(e) = run(config).await {
        error!("relayq failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Settings) -> Result<(), RelayError> {
    // An unreachable store is fatal here, before the loop starts.
    let store = Arc::new(SledQueue::open(&config.queue.path)?);
    let registry = Arc::new(Mutex::new(Registry::new()));
    let queues = QueueNames::new(&config.queue.name);
    let token = CancellationToken::new();

    let policy = RetryPolicy {
        max_retries: config.queue.max_retries,
        retry_on_no_subscribers: config.queue.retry_on_no_subscribers,
    };
    let relay = Relay::new(
        store.clone(),
        registry.clone(),
        queues.clone(),
        policy,
        token.clone(),
    )
    .pop_timeout(Duration::from_secs(config.queue.pop_timeout_secs))
    .require_json_payload(config.queue.require_json_payload);
    let consumer = tokio::spawn(relay.run());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tokio::select! {
        result = start_websocket_server(&addr, registry, store, queues, token.clone()) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received; finishing in-flight work");
        }
    }

    // The consumer finishes its current unit of work before stopping.
    token.cancel();
    let _ = consumer.await;
    Ok(())
}
