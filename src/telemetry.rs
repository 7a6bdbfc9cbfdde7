//! Tracing initialisation for the cherrypicker binary

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `debug` for
/// this crate and `warn` everywhere. Only the first call takes effect.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,cherrypicker=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
