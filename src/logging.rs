use std::io;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing subscriber once per process.
///
/// Logs go to stderr: stdout is the benchmark's measured output channel and
/// carries only echoed lines, parse results, and the summary line.
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uabench=info"));

        fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    });
}
