//! Log output setup
//!
//! Messages go to stdout as bare lines: no timestamp, level, target or colour.

use tracing::Level;

pub fn init() {
    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .try_init();
}
