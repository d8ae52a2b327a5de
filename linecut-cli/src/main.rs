use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fs_err as fs;
use linecut_edit::{RepairError, RepairReport, load};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "linecut",
    version,
    about = "Remove the known block of garbage lines from assets/app.js."
)]
struct Cli {
    /// Directory the target path is resolved against (default: current directory).
    #[arg(long, default_value = ".")]
    root: Utf8PathBuf,

    /// Show the patch instead of writing the file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON report of the repair to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

/// Every outcome exits 0; stdout carries the result.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Argument errors are reported like any other failure; the exit status stays 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };
    if let Err(e) = real_main(&cli) {
        print_failure(&e);
    }
    ExitCode::SUCCESS
}

fn real_main(cli: &Cli) -> Result<(), RepairError> {
    let loaded = load(&cli.root)?;
    loaded.check_guard()?;
    println!(
        "Found expected garbage at line {}.",
        loaded.guard().line_number()
    );

    let edited = loaded.excise();
    let report = if cli.dry_run {
        println!("dry-run: not written");
        print!("{}", edited.preview());
        edited.report(true)
    } else {
        let report = edited.write()?;
        println!("Successfully removed garbage lines.");
        report
    };

    if let Some(path) = &cli.report {
        write_report(path, &report)?;
    }
    Ok(())
}

fn print_failure(err: &RepairError) {
    match err {
        RepairError::Guard(guard) => {
            debug!("guard check failed: {}", guard);
            let line_number = guard.line_number();
            println!("Line {line_number} content mismatch or file too short");
            if let Some(actual) = guard.actual_line() {
                println!("Actual line {line_number}: {actual}");
            }
        }
        RepairError::Runtime(e) => println!("{e:#}"),
    }
}

fn write_report(path: &Utf8Path, report: &RepairReport) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    info!("wrote report to {}", path);
    Ok(())
}
