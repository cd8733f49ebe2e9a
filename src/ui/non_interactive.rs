//! Non-interactive UI for CI/headless environments.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners are replaced with plain line output since animated progress
/// produces noisy output in log-based environments.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("… {}", message);
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!();
            println!("◈ {}", title);
            println!();
        }
    }

    fn show_boxed(&mut self, lines: &[&str]) {
        println!();
        for line in lines {
            println!("{}", line);
        }
        println!();
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints plain completion lines.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("○ {}", msg);
        }
    }
}
