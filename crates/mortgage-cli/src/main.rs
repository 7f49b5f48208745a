mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::io;
use std::process;

use commands::amortization::LoanArgs;

/// Fixed-payment mortgage amortization schedules
#[derive(Parser)]
#[command(
    name = "mtg",
    version,
    about = "Fixed-payment mortgage amortization schedules",
    long_about = "Computes the level payment, the payment-by-payment interest and principal \
                  split, and summary statistics for a fixed-rate mortgage with decimal \
                  precision. Rates are entered as percentages; the compounding frequency \
                  may differ from the payment frequency."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "report", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Full amortization schedule with summary statistics
    Schedule(LoanArgs),
    /// Periodic interest factor and blended payment
    Payment(LoanArgs),
    /// Summary statistics only
    Summary(LoanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Report,
    Json,
    Table,
    Csv,
    Minimal,
}

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = SimpleLogger::new().with_level(log_level(cli.verbose)).init() {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow(), e);
    }

    let result = match cli.command {
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Summary(args) => commands::amortization::run_summary(args),
        Commands::Version => {
            println!("mtg {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let written = result.and_then(|out| {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        output::format_output(&cli.output, &out, &mut handle)
    });

    if let Err(e) = written {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}
