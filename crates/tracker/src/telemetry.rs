use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Calling this again
/// after a subscriber is installed does nothing.
pub fn init_tracing(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
