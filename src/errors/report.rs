// src/errors/report.rs
//! Rendering utilities for miette diagnostics.

use std::io::IsTerminal;

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, ThemeCharacters, ThemeStyles};

use crate::cli::ColorMode;

/// Create a handler for terminal output (unicode + colors).
pub fn terminal_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::unicode(),
        styles: ThemeStyles::ansi(),
    };
    GraphicalReportHandler::new_themed(theme)
}

/// Create a handler for plain output (ascii + no colors).
pub fn plain_handler() -> GraphicalReportHandler {
    let theme = GraphicalTheme {
        characters: ThemeCharacters::ascii(),
        styles: ThemeStyles::none(),
    };
    GraphicalReportHandler::new_themed(theme)
}

fn handler_for(color: ColorMode) -> GraphicalReportHandler {
    let colored = match color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stderr().is_terminal(),
    };
    if colored {
        terminal_handler()
    } else {
        plain_handler()
    }
}

/// Render to stderr, honoring `--color`.
pub fn render_to_stderr(report: &dyn Diagnostic, color: ColorMode) {
    let handler = handler_for(color);
    let mut output = String::new();
    if handler.render_report(&mut output, report).is_ok() {
        eprint!("{}", output);
    }
}

/// Render to a buffer without colors (for tests).
pub fn render_to_string(report: &dyn Diagnostic) -> String {
    let mut output = String::new();
    let _ = plain_handler().render_report(&mut output, report);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CliError;
    use rill_runtime::RuntimeError;

    #[test]
    fn render_runtime_error_to_string() {
        let err = CliError::from(RuntimeError::TypeCannotIterate {
            class: "Float".to_string(),
        });
        let output = render_to_string(&err);
        assert!(output.contains("E4001"), "should contain error code");
        assert!(
            output.contains("can't iterate from Float"),
            "should contain message"
        );
        assert!(output.contains("succ"), "should contain help text");
    }

    #[test]
    fn render_driver_error_with_help() {
        let err = CliError::Unbounded {
            range: "1..".to_string(),
        };
        let output = render_to_string(&err);
        assert!(output.contains("E5001"));
        assert!(output.contains("--take"));
    }
}
