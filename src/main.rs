//! netlify-lm CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use netlify_lm::cli::{Cli, CommandDispatcher};
use netlify_lm::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("netlify_lm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("netlify_lm=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("netlify-lm starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let is_interactive = console::Term::stdout().is_term();
    let mut ui = create_ui(is_interactive, output_mode);

    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
