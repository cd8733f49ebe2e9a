//! Terminal user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use netlify_lm::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Netlify Large Media");
//! ui.success("Setup complete!");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, LmTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a boxed callout (e.g. the post-install PATH instructions).
    fn show_boxed(&mut self, lines: &[&str]);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}
