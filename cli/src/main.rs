mod commands;
mod csv_io;
mod output;

use std::process::ExitCode;
use std::sync::OnceLock;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "datascore")]
#[command(about = "Score candidate tabular datasets against a reference")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare a candidate CSV against a reference CSV")]
    Compare {
        #[arg(help = "Path to the reference (ground truth) CSV")]
        reference: String,
        #[arg(help = "Path to the candidate CSV under evaluation")]
        candidate: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, help = "Also write the pretty JSON report to this path")]
        output_json: Option<String>,
        #[arg(
            long,
            default_value_t = 256,
            help = "Aligned-row sample size for column-mapping confidence (negative clamps to 0)"
        )]
        sample_size_mapping: i64,
        #[arg(long, short, help = "Quiet mode: only show status and overall score")]
        quiet: bool,
    },
    #[command(about = "Build a shuffled/renamed candidate CSV from a reference CSV")]
    Shuffle {
        #[arg(help = "Input CSV path")]
        input: String,
        #[arg(help = "Output CSV path")]
        output: String,
        #[arg(long, default_value_t = 20260224, help = "Deterministic shuffle seed")]
        seed: u64,
        #[arg(
            long,
            default_value_t = 0,
            help = "If > 0, keep only this many rows after shuffling"
        )]
        sample_rows: usize,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if std::env::var("RUST_LOG").is_err() {
            builder.filter_module("datascore", log::LevelFilter::Warn);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            reference,
            candidate,
            format,
            output_json,
            sample_size_mapping,
            quiet,
        } => commands::compare::run(
            &reference,
            &candidate,
            format,
            output_json.as_deref(),
            sample_size_mapping,
            quiet,
        ),
        Commands::Shuffle {
            input,
            output,
            seed,
            sample_rows,
        } => commands::shuffle::run(&input, &output, seed, sample_rows),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
