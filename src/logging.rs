// Diagnostic logging goes to stderr through `env_logger` so it never mixes
// with rendered output on stdout. Quiet by default; `RUST_LOG=debug`
// shows token source selection and request/response lines.

use env_logger::Env;

const DEFAULT_FILTER: &str = "warn";

/// Install the global logger. Safe to call more than once; later calls
/// are no-ops.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .try_init();
}
