use clap::{Parser, ValueEnum};
use linear_equations::{DivisionPolicy, Options};
use std::io::{BufRead, BufReader};

/// Solve linear equations in `x`, one per line, read from stdin.
///
/// Reading stops at the end of input or at a line containing just "exit".
#[derive(Debug, Parser)]
#[command(name = "cli")]
struct Cli {
    /// Decimal places used for non-integer solutions.
    #[arg(long, default_value_t = Options::DEFAULT_PRECISION)]
    precision: usize,

    /// Fail instead of truncating when a division isn't exact.
    #[arg(long)]
    reject_inexact: bool,

    /// Set log level, overriding RUST_LOG
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl Cli {
    fn options(&self) -> Options {
        let policy = if self.reject_inexact {
            DivisionPolicy::Reject
        } else {
            DivisionPolicy::Truncate
        };

        Options::default()
            .with_precision(self.precision)
            .with_inexact_division(policy)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if let Some(level) = cli.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    let options = cli.options();
    log::info!("Solving with {:?}", options);

    let stdin = std::io::stdin();

    for line in BufReader::new(stdin.lock()).lines() {
        let line = line?;
        let equation = line.trim();

        if equation == "exit" {
            break;
        }
        if equation.is_empty() {
            continue;
        }

        println!("Equ: {}", equation);
        println!(
            "Sol: {}",
            linear_equations::solve_to_string_with(equation, &options)
        );
    }

    Ok(())
}
