use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr, leaving stdout to the event stream.
///
/// `RUST_LOG` overrides the default `info` level. Records from crates using
/// the `log` facade are forwarded as well. Calling this twice is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
