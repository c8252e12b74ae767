/// Initializes the tracing subscriber for the embedding shell. Call once at
/// startup; repeated calls are ignored so tests can share it.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitdash=debug".into()),
        )
        .try_init();
}
