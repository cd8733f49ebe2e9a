//! Visual theme and styling.

use console::Style;

/// The CLI's visual theme.
#[derive(Debug, Clone)]
pub struct LmTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational/running elements (teal).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (teal bold).
    pub header: Style,
    /// Style for box-drawing borders (teal).
    pub border: Style,
}

impl Default for LmTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl LmTheme {
    /// Create the default theme.
    ///
    /// Teal (256-color 43) is the closest match to Netlify's brand color.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().color256(43),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().color256(43),
            border: Style::new().color256(43),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◈"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a message inside a box, centered.
    ///
    /// Used for the post-install banner pointing at the PATH snippet.
    pub fn format_boxed(&self, lines: &[&str]) -> String {
        let width = lines.iter().map(|l| console::measure_text_width(l)).max().unwrap_or(0);
        let b = &self.border;
        let mut out = String::new();
        out.push_str(&format!("{}\n", b.apply_to(format!("┌{}┐", "─".repeat(width + 2)))));
        for line in lines {
            let pad = width - console::measure_text_width(line);
            let left = pad / 2;
            let right = pad - left;
            out.push_str(&format!(
                "{} {}{}{} {}\n",
                b.apply_to("│"),
                " ".repeat(left),
                self.highlight.apply_to(*line),
                " ".repeat(right),
                b.apply_to("│"),
            ));
        }
        out.push_str(&format!("{}", b.apply_to(format!("└{}┘", "─".repeat(width + 2)))));
        out
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
