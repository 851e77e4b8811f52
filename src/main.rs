//  MAIN.rs
//    by Lut99
//
//  Created:
//    03 May 2024, 14:14:18
//  Last edited:
//    14 Mar 2025, 17:58:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Entrypoint to the `keep-derivable` binary.
//!
//!   Reads named ground clauses from stdin, writes the ones worth keeping
//!   to stdout, and writes the derivable alarms to a file.
//

use std::io;
use std::path::PathBuf;

use clap::Parser;
use error_trace::toplevel;
use humanlog::{DebugMode, HumanLogger};
use keep_derivable::pipeline::{self, Paths, Report};
use log::{debug, error, info};


/***** ARGUMENTS *****/
/// Prunes ground clauses (read from stdin) and alarms to the ones derivable from the given tuples.
///
/// Usage: ./keep-derivable allEDB.txt SemAlarm.txt SemAllAlarm.txt.ukd SemAllAlarm.txt < rules.txt > kept.txt
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,

    /// The file with the tuples that are given (the effective EDB).
    #[clap(name = "EDB")]
    edb: PathBuf,
    /// The file with the new alarms, which we only check are derivable.
    #[clap(name = "NEW_ALARMS")]
    new_alarms: PathBuf,
    /// The file with all alarms to filter.
    #[clap(name = "ALL_ALARMS")]
    all_alarms: PathBuf,
    /// The file to write the derivable alarms to. Overwritten if it exists.
    #[clap(name = "DERIVABLE_ALARMS")]
    derivable_alarms: PathBuf,
}





/***** ENTRYPOINT *****/
fn main() {
    // Parse the CLI arguments
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // `--help` and `--version` are not errors
            let code: i32 = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        },
    };

    // Setup the logger
    if let Err(err) = HumanLogger::terminal(if args.debug { DebugMode::Full } else { DebugMode::HumanFriendly }).init() {
        eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
    }
    info!("{} - v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    // Run it
    let paths = Paths { edb: args.edb, new_alarms: args.new_alarms, all_alarms: args.all_alarms, derivable_alarms: args.derivable_alarms };
    let report: Report = match pipeline::run_files(io::stdin().lock(), "<stdin>", &paths, io::stdout().lock()) {
        Ok(report) => report,
        Err(err) => {
            error!("{}", toplevel!(("Failed to prune rules read from stdin against '{}'", paths.edb.display()), err));
            std::process::exit(1);
        },
    };
    debug!(
        "Kept {} out of {} clauses and {} out of {} alarms",
        report.emitted_clauses, report.clauses, report.derivable_alarms, report.all_alarms
    );
    info!("Wrote derivable alarms to '{}'", paths.derivable_alarms.display());
}
