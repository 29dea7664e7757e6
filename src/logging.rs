use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing to stderr.
///
/// Default level is INFO; override with `RUST_LOG`.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_target(true).compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
