// ============================================================
// File: main.rs
//
// Description:
//   Entry point for the sales insight tool. Opens a session on
//   the data file, hands off to the REPL, and writes the
//   catalog back out when the user exits.
//
// Notes:
//   - Logs go to stderr so stdout only carries REPL output.
//   - RUST_LOG, when set, takes precedence over --log-filter.
// ============================================================
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sales_insight::{repl_loop, Session, DATA_FILE};

#[derive(Parser, Debug)]
#[command(author, version, about = "Product catalog with sales insights", long_about = None)]
struct Args {
    /// Catalog data file, loaded at startup and saved on exit.
    #[arg(long, default_value = DATA_FILE)]
    data_file: PathBuf,

    /// Tracing filter directive used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    log_filter: String,

    /// Do not write the catalog back on exit.
    #[arg(long)]
    no_save: bool,
}


/// Entry point for the sales insight tool.
fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!("=== SALES INSIGHT (AVL + Prediction) ===");

    // Load data from file
    let mut session = match Session::open(args.data_file.clone()) {
        Ok(session) => session,
        Err(e) => {
            error!(path = %args.data_file.display(), error = %e, "could not load catalog");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} products from {}", session.index.len(), args.data_file.display());
    println!("Type HELP for commands.");

    // Hand off to the main command loop
    repl_loop(&mut session);

    if args.no_save {
        info!("exiting without saving");
        return ExitCode::SUCCESS;
    }

    match session.save() {
        Ok(count) => {
            println!("Saved {} products. Exiting.", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(path = %args.data_file.display(), error = %e, "could not save catalog");
            ExitCode::FAILURE
        }
    }
}
