// pick_next_rs: diagnostic logging
//
// Open Source licensing under terms of GNU General Public License version 3
// SPDX identifier: GPL-3.0-only
// https://opensource.org/licenses/GPL-3.0
// https://www.gnu.org/licenses/gpl-3.0.en.html

//! Diagnostics via `RUST_LOG`, written to stderr so they never mix with the
//! picker's own output on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber. Defaults to `warn` when `RUST_LOG` is unset.
///
/// ```bash
/// RUST_LOG=pick_next_rs=debug pick-next status
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // a subscriber may already be installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
