//! brickline CLI - Renko brick builder for OHLCV bar data.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "brickline")]
#[command(about = "Build renko bricks from OHLCV bar data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build renko bricks from a CSV bar file
    Build {
        /// Input CSV file with time,open,high,low,close,volume rows
        input: PathBuf,

        /// Brick size in price units (overrides --pips)
        #[arg(short, long)]
        size: Option<Decimal>,

        /// Brick size in pips
        #[arg(long, default_value = "10")]
        pips: u32,

        /// Pip size in price units
        #[arg(long, default_value = "0.0001")]
        pip_size: Decimal,

        /// Symbol decimal precision for body-range rounding
        #[arg(short, long, default_value = "5")]
        digits: u32,

        /// Output file path. Defaults to <input stem>_bricks.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Also write the per-index output series to this path
        #[arg(long)]
        series: Option<PathBuf>,

        /// Include the still-open brick in the output
        #[arg(long)]
        partial: bool,

        /// Disable the open output channel
        #[arg(long)]
        no_open: bool,

        /// Disable the high output channel
        #[arg(long)]
        no_high: bool,

        /// Disable the low output channel
        #[arg(long)]
        no_low: bool,

        /// Disable the close output channel
        #[arg(long)]
        no_close: bool,
    },

    /// Show summary information about a CSV bar file
    Info {
        /// Input CSV file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Build {
            input,
            size,
            pips,
            pip_size,
            digits,
            output,
            format,
            series,
            partial,
            no_open,
            no_high,
            no_low,
            no_close,
        } => {
            let toggles = brickline_lib::OutputToggles {
                open: !no_open,
                high: !no_high,
                low: !no_low,
                close: !no_close,
            };
            commands::build::build(
                &input, size, pips, pip_size, digits, output, format, series, partial, toggles,
                cli.quiet,
            )
        }
        Commands::Info { input } => commands::info::show_info(&input),
    }
}
