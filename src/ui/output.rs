//! Output verbosity mode.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including subprocess output.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show minimal output (spinners + final status).
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
