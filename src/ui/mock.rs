//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use netlify_lm::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Starting setup");
//! ui.success("Done!");
//!
//! // Assert on captured interactions
//! assert!(ui.messages().contains(&"Starting setup".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::sync::{Arc, Mutex};

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions, including spinner completions.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    boxed: Vec<Vec<String>>,
    spinners: Vec<String>,
    spinner_results: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured boxed callouts.
    pub fn boxed(&self) -> &[Vec<String>] {
        &self.boxed
    }

    /// Get the messages spinners were started with.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get `(kind, message)` pairs of spinner completions, in order.
    ///
    /// Kind is one of `"success"`, `"error"`, `"skipped"`.
    pub fn spinner_results(&self) -> Vec<(String, String)> {
        self.spinner_results.lock().unwrap().clone()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Arc::clone(&self.spinner_results),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_boxed(&mut self, lines: &[&str]) {
        self.boxed
            .push(lines.iter().map(|s| s.to_string()).collect());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Spinner handle that records its completion into the owning MockUI.
struct MockSpinner {
    results: Arc<Mutex<Vec<(String, String)>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.results
            .lock()
            .unwrap()
            .push(("success".to_string(), msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.results
            .lock()
            .unwrap()
            .push(("error".to_string(), msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.results
            .lock()
            .unwrap()
            .push(("skipped".to_string(), msg.to_string()));
    }
}
