/// Initialize tracing for the relay.
///
/// The level comes from configuration; anything unrecognized falls back to
/// `info`. Uses `try_init` so tests and embedding code can call this more
/// than once without panicking.
pub fn init(level: &str) {
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
