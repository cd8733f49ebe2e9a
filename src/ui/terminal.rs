//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, LmTheme, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle,
    UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: LmTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            LmTheme::new()
        } else {
            LmTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_boxed(&mut self, lines: &[&str]) {
        writeln!(self.term, "\n{}\n", self.theme.format_boxed(lines)).ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI for the environment.
pub fn create_ui(is_interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if is_interactive {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
