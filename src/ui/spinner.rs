//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::LmTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Create a spinner that doesn't show (for quiet mode).
    pub fn hidden() -> Self {
        let bar = ProgressBar::hidden();
        Self { bar }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let theme = LmTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        let theme = LmTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        let theme = LmTheme::new();
        self.bar
            .set_style(ProgressStyle::default_spinner().template("{msg}").unwrap());
        self.bar.finish_with_message(theme.format_skipped(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner_accepts_updates() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.set_message("working");
        spinner.finish_success("done");
    }

    #[test]
    fn spinner_finish_variants_do_not_panic() {
        let mut ok = ProgressSpinner::hidden();
        ok.finish_success("ok");
        let mut err = ProgressSpinner::hidden();
        err.finish_error("bad");
        let mut skip = ProgressSpinner::hidden();
        skip.finish_skipped("skipped");
    }
}
