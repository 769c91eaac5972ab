//! Logging setup for applications embedding the dialogs.
//!
//! The dialogs emit `tracing` events under the `dear_file_dialog` target
//! (listing, navigation, selection, folder creation, confirmation prompts,
//! layout recomputation). These helpers install a `tracing-subscriber` fmt
//! subscriber for hosts that do not configure one themselves.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "dear_file_dialog=info,warn";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install a fmt subscriber with an explicit filter directive such as
/// `"dear_file_dialog=trace"`.
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn install(filter: EnvFilter) {
    // A host may already own the global subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}
