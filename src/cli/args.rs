// src/cli/args.rs

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::version::version_string;

/// Color output mode
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Drive the runtime's iteration methods from the command line
#[derive(Parser)]
#[command(name = "rill")]
#[command(version = version_string())]
#[command(about = "Eager and lazy iteration over integers and ranges", long_about = None)]
pub struct Cli {
    /// Color output: auto, always, never
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Call `N.times`
    #[command(allow_negative_numbers = true)]
    Times {
        #[arg(value_name = "N")]
        n: String,

        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Call `START.upto(END)`
    #[command(allow_negative_numbers = true)]
    Upto {
        #[arg(value_name = "START")]
        start: String,

        #[arg(value_name = "END")]
        end: String,

        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Iterate the range `FIRST..LAST` (endless when LAST is omitted or nil)
    #[command(allow_negative_numbers = true)]
    Each {
        #[arg(value_name = "FIRST")]
        first: String,

        #[arg(value_name = "LAST")]
        last: Option<String>,

        /// Leave LAST out of the range (`FIRST...LAST`)
        #[arg(long)]
        exclusive: bool,

        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Show version information
    Version,
}

/// How the call is driven.
#[derive(Args, Clone, Debug, Default)]
pub struct ModeArgs {
    /// Call without a block and materialize the enumerator into an array
    #[arg(long, conflicts_with_all = ["lazy", "take"])]
    pub to_a: bool,

    /// Call without a block and pull elements with `next`
    #[arg(long)]
    pub lazy: bool,

    /// Stop after K calls to `next` (implies --lazy)
    #[arg(long, value_name = "K")]
    pub take: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Pass a printing block.
    Eager,
    ToA,
    Lazy { take: Option<usize> },
}

impl ModeArgs {
    pub fn mode(&self) -> Mode {
        if self.to_a {
            Mode::ToA
        } else if self.lazy || self.take.is_some() {
            Mode::Lazy { take: self.take }
        } else {
            Mode::Eager
        }
    }
}
