//! Log output goes to stderr so reports written to stdout stay machine-readable.
//! `RUST_LOG` overrides the built-in directives.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUIET_DIRECTIVES: &str = "seismic_impact=info,warn";
const VERBOSE_DIRECTIVES: &str = "seismic_impact=debug,info";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        QUIET_DIRECTIVES
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Compact human-readable lines. Per-site and bisection details appear with
/// `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

/// One JSON object per event, for runs consumed by other tools.
pub fn init_json_logger() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false);

    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(layer)
        .init();
}
