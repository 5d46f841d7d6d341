mod output;
mod server;

use clap::Parser;
use colored::Colorize;
use jsoncmp_core::{suite, DuplicatePolicy, FsSource, RunReport, Suite, Verdict};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Every case passed
const EXIT_PASS: i32 = 0;
/// At least one case failed
const EXIT_FAIL: i32 = 1;
/// Bad arguments, unreadable input, or the result could not be emitted
const EXIT_ERROR: i32 = 2;

const USAGE: &str = "Usage: jsoncmp file1L file1R [file2L file2R ...]";

/// jsoncmp — batch JSON sameness checker
///
/// Compares left/right pairs of JSON files, ignoring key case and the case of
/// values tagged `"type": "HEX"`, and writes a `Pass` or `Fail` result file
/// next to the first input.
#[derive(Parser)]
#[command(name = "jsoncmp", version, about, long_about = None)]
struct Cli {
    /// JSON files as left/right pairs: file1L file1R file2L file2R ...
    files: Vec<PathBuf>,

    /// Directory for the result file [default: directory of the first file]
    #[arg(long, env = "JSONCMP_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Serve the result over HTTP on this address after the run
    #[arg(long, env = "JSONCMP_SERVE", value_name = "ADDR")]
    serve: Option<String>,

    /// Stop serving after this many requests
    #[arg(long, requires = "serve", value_name = "N")]
    max_requests: Option<usize>,

    /// Treat two pairs with the same case name as an error
    #[arg(long)]
    reject_duplicates: bool,

    /// Print the result collection as JSON instead of a listing
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    process::exit(run(&cli));
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let out_dir = cli
        .out_dir
        .clone()
        .or_else(|| suite::save_dir(&cli.files));

    let policy = if cli.reject_duplicates {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Replace
    };

    let suite = match Suite::from_paths(&cli.files, policy) {
        Ok(suite) => suite,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            eprintln!("{}", USAGE);
            if let Some(dir) = &out_dir {
                // Best effort: the usage error is what gets reported
                let _ = emit(dir, &RunReport::errored(0));
            }
            return EXIT_ERROR;
        }
    };

    let Some(dir) = out_dir else {
        return EXIT_ERROR;
    };
    if let Err(err) = output::clear_stale(&dir) {
        eprintln!(
            "{} cannot remove old result in {}: {}",
            "error:".red().bold(),
            dir.display(),
            err
        );
        return EXIT_ERROR;
    }

    if !cli.json {
        println!("{}", "------ Comparing JSON Files ------".bold());
    }
    let report = jsoncmp_core::run_suite(&suite, &FsSource);

    if cli.json {
        println!("{}", report.to_json());
    } else {
        print_listing(&report);
    }

    if emit(&dir, &report).is_err() {
        return EXIT_ERROR;
    }

    if let Some(addr) = &cli.serve {
        if let Err(err) = serve(addr, report.to_json(), cli.max_requests) {
            eprintln!("{} cannot serve on {}: {}", "error:".red().bold(), addr, err);
            return EXIT_ERROR;
        }
    }

    exit_code(&report)
}

fn exit_code(report: &RunReport) -> i32 {
    if report.has_error() {
        EXIT_ERROR
    } else if report.fail_count() > 0 {
        EXIT_FAIL
    } else {
        EXIT_PASS
    }
}

/// Write the result file, reporting where it went
fn emit(dir: &Path, report: &RunReport) -> io::Result<PathBuf> {
    match output::write_report(dir, report) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "saved result");
            Ok(path)
        }
        Err(err) => {
            eprintln!(
                "{} cannot write result to {}: {}",
                "error:".red().bold(),
                dir.display(),
                err
            );
            Err(err)
        }
    }
}

fn print_listing(report: &RunReport) {
    for result in report.results() {
        match result.verdict {
            Verdict::Pass => println!("  {} {}", "✓".green(), result.record()),
            Verdict::Fail => println!("  {} {}", "✗".red(), result.record()),
        }
    }

    let summary = report.summary();
    let line = format!(
        "{} tests: {} passed, {} failed",
        summary.count, summary.pass, summary.fail
    );
    if report.is_passing() {
        println!("{}", line.green().bold());
    } else if report.has_error() {
        println!("{} (input errors)", line.red().bold());
    } else {
        println!("{}", line.red().bold());
    }
}

fn serve(addr: &str, body: String, max_requests: Option<usize>) -> io::Result<()> {
    let server = server::StatusServer::bind(addr, body)?;
    println!("Serving results at http://{}/", server.local_addr()?);
    let served = server.serve(max_requests)?;
    tracing::info!(served, "status server stopped");
    Ok(())
}
