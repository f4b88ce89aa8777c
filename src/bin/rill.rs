// src/bin/rill.rs

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ColorChoice, CommandFactory, FromArgMatches};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use rill::cli::{Cli, Commands};
use rill::commands::iterate::{Call, run_iteration};
use rill::commands::version::print_version;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

/// Install a stderr subscriber when `RILL_LOG` holds a filter directive.
/// `RILL_LOG_STYLE=full` keeps timestamps; the default is compact.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("RILL_LOG") else {
        return;
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if std::env::var("RILL_LOG_STYLE").is_ok_and(|style| style == "full") {
        builder.init();
    } else {
        builder.with_timer(NoTimestamp).init();
    }
    tracing::debug!("tracing initialized");
}

fn main() -> ExitCode {
    init_tracing();

    // Pre-scan args to determine color choice for clap's help output
    let color_choice = get_color_choice_from_args();

    let styles = Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default());

    let matches = Cli::command()
        .styles(styles)
        .color(color_choice)
        .get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    match cli.command {
        Commands::Times { n, mode } => run_iteration(Ok(Call::times(&n)), mode.mode(), cli.color),
        Commands::Upto { start, end, mode } => {
            run_iteration(Ok(Call::upto(&start, &end)), mode.mode(), cli.color)
        }
        Commands::Each {
            first,
            last,
            exclusive,
            mode,
        } => run_iteration(
            Call::each(&first, last.as_deref(), exclusive),
            mode.mode(),
            cli.color,
        ),
        Commands::Version => print_version(),
    }
}

/// Find `--color` before clap runs so help output honors it.
fn get_color_choice_from_args() -> ColorChoice {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value = args.iter().enumerate().find_map(|(i, arg)| {
        if arg == "--color" {
            args.get(i + 1).map(String::as_str)
        } else {
            arg.strip_prefix("--color=")
        }
    });
    match value.map(str::to_lowercase).as_deref() {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        Some(_) => ColorChoice::Auto,
        None if std::io::stdout().is_terminal() => ColorChoice::Always,
        None => ColorChoice::Never,
    }
}
