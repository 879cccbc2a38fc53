use tracing_subscriber::filter::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "bankist=info";

/// Log to stderr so stdout stays free for the display.
pub fn set_up() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(true)
        .init();
}
