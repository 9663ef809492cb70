mod cell;
mod error;
mod extractor;
mod graph;
mod parser;
mod scheduler;
mod sheet;
mod types;
mod utils;

use crate::error::CommandStatus;
use crate::sheet::{display_sheet, process_command};
use crate::types::Sheet;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// A terminal-driven integer spreadsheet: assign formulas to cells drawn
/// from a fixed-size grid and watch dependent cells recompute.
#[derive(Parser)]
#[command(name = "cellsheet", version, about)]
struct Cli {
    /// Number of rows in the sheet.
    #[arg(value_parser = clap::value_parser!(i32).range(1..))]
    rows: i32,

    /// Number of columns in the sheet.
    #[arg(value_parser = clap::value_parser!(i32).range(1..))]
    cols: i32,

    /// Suppress grid/status output at startup (equivalent to issuing
    /// `disable_output` as the first command).
    #[arg(long)]
    quiet: bool,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut sheet = Sheet::new(cli.rows, cli.cols);
    sheet.output_enabled = !cli.quiet;
    tracing::info!(rows = cli.rows, cols = cli.cols, quiet = cli.quiet, "sheet created");

    let stdin = io::stdin();
    let mut elapsed = 0.0f64;
    let mut status = CommandStatus::Ok;

    loop {
        display_sheet(&sheet);
        print!("[{elapsed:.1}] ({status}) > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim();
        if command == "q" {
            break;
        }

        let start = Instant::now();
        status = process_command(&mut sheet, command);
        elapsed = start.elapsed().as_secs_f64();
    }

    Ok(())
}
