//! Command implementations behind the CLI
//!
//! Each command returns the text to print on stdout so `main` stays the
//! only place that writes output or decides the exit status.

pub mod latest;
pub mod show;
pub mod sources;
pub mod status;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr while sources are fetched; hidden when stderr is not a terminal
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
