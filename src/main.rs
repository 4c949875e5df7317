use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

/// Batch-mode symbolic polynomial calculator.
#[derive(Parser)]
#[command(name = "polycalc", version, about)]
struct Cli {
    /// Input file with one directive per line.
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match polycalc::run_file(&cli.input, &mut out) {
        Ok(()) => {
            let _ = out.flush();
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
