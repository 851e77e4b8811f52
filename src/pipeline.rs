//  PIPELINE.rs
//    by Lut99
//
//  Created:
//    12 Mar 2025, 11:08:55
//  Last edited:
//    14 Mar 2025, 17:35:02
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the full batch run of the tool: reading rules and tuple
//!   files, computing dates of birth, and writing out what is derivable.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools as _;

use crate::ast::{RuleSet, Tuple};
use crate::derivation::{self, DobMap, derivable, forward_clauses, productive_clauses, report_underivable};
use crate::log::{debug, info};
use crate::parser;


/***** ERRORS *****/
/// Defines errors that may occur during a [`run()`].
#[derive(Debug)]
pub enum Error {
    /// Failed to read some input.
    Read { what: String, err: io::Error },
    /// Failed to create an output file.
    Create { path: PathBuf, err: io::Error },
    /// Failed to write to some output.
    Write { what: String, err: io::Error },
    /// The rules were malformed.
    Parse { err: parser::Error },
    /// The dates of birth could not be computed.
    Derive { err: derivation::Error },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Read { what, .. } => write!(f, "Failed to read {what}"),
            Self::Create { path, .. } => write!(f, "Failed to create output file '{}'", path.display()),
            Self::Write { what, .. } => write!(f, "Failed to write to {what}"),
            Self::Parse { .. } => write!(f, "Failed to parse rules"),
            Self::Derive { .. } => write!(f, "Failed to compute dates of birth"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Read { err, .. } => Some(err),
            Self::Create { err, .. } => Some(err),
            Self::Write { err, .. } => Some(err),
            Self::Parse { err } => Some(err),
            Self::Derive { err } => Some(err),
        }
    }
}





/***** AUXILLARY *****/
/// The files a [`run_files()`] works with.
#[derive(Clone, Debug)]
pub struct Paths {
    /// The tuples that are given (the effective EDB).
    pub edb: PathBuf,
    /// Alarms that we expect to be derivable. Only used for diagnostics.
    pub new_alarms: PathBuf,
    /// All alarms to filter.
    pub all_alarms: PathBuf,
    /// Where to write the derivable alarms to.
    pub derivable_alarms: PathBuf,
}

/// The inputs of a [`run()`], already parsed.
#[derive(Clone, Debug, Default)]
pub struct Inputs {
    /// The clauses to prune.
    pub rules: RuleSet,
    /// The tuples that are given (the effective EDB).
    pub edb: Vec<Tuple>,
    /// Alarms that we expect to be derivable. Only used for diagnostics.
    pub new_alarms: Vec<Tuple>,
    /// All alarms to filter.
    pub all_alarms: Vec<Tuple>,
}

/// Summarizes what a [`run()`] did.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    /// The number of unique clauses read.
    pub clauses: usize,
    /// The number of unique tuples mentioned by the clauses.
    pub tuples: usize,
    /// The number of unique tuples derived by at least one clause.
    pub consequents: usize,
    /// The number of distinct tuples given.
    pub edb: usize,
    /// The number of distinct new alarms given.
    pub new_alarms: usize,
    /// The number of forward clauses.
    pub forward_clauses: usize,
    /// The number of clauses written out.
    pub emitted_clauses: usize,
    /// The number of tuples mentioned by clauses that are never derived.
    pub unreachable_tuples: usize,
    /// The number of distinct new alarms that are never derived.
    pub underivable_new_alarms: usize,
    /// The number of alarms to filter (with duplicates).
    pub all_alarms: usize,
    /// The number of alarms written out.
    pub derivable_alarms: usize,
    /// The number of fixpoint rounds run.
    pub rounds: usize,
    /// The last round in which any tuple was born, if any.
    pub max_epoch: Option<usize>,
}
impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        writeln!(f, "Report {{")?;
        writeln!(f, "    clauses   : {} read, {} forward, {} kept", self.clauses, self.forward_clauses, self.emitted_clauses)?;
        writeln!(f, "    tuples    : {} mentioned, {} consequents, {} unreachable", self.tuples, self.consequents, self.unreachable_tuples)?;
        writeln!(f, "    edb       : {} given", self.edb)?;
        writeln!(f, "    new alarms: {} given, {} underivable", self.new_alarms, self.underivable_new_alarms)?;
        writeln!(f, "    alarms    : {} given, {} derivable", self.all_alarms, self.derivable_alarms)?;
        match self.max_epoch {
            Some(epoch) => writeln!(f, "    fixpoint  : {} rounds, last birth at epoch {epoch}", self.rounds)?,
            None => writeln!(f, "    fixpoint  : {} rounds, nothing born", self.rounds)?,
        }
        writeln!(f, "}}")
    }
}





/***** HELPERS *****/
/// Reads a whole file to a string.
#[inline]
fn read_file(path: &Path) -> Result<String, Error> {
    debug!("Reading input file '{}'...", path.display());
    fs::read_to_string(path).map_err(|err| Error::Read { what: format!("input file '{}'", path.display()), err })
}





/***** LIBRARY *****/
/// Prunes the given rules and alarms to what is derivable.
///
/// # Arguments
/// - `inputs`: The [`Inputs`] to work with.
/// - `clauses_out`: Where to write the clauses worth keeping to, one `Name: clause` per line.
/// - `alarms_out`: Where to write the derivable alarms to, one per line.
///
/// # Returns
/// A [`Report`] summarizing the run.
///
/// # Errors
/// This function errors if we failed to write to either output, or if the fixpoint computation
/// failed. Unreachable tuples and underivable new alarms are _not_ errors; they are only logged.
pub fn run(inputs: &Inputs, mut clauses_out: impl Write, mut alarms_out: impl Write) -> Result<Report, Error> {
    let edb: usize = inputs.edb.iter().unique().count();
    let new_alarms: usize = inputs.new_alarms.iter().unique().count();
    info!("Loaded {} clauses.", inputs.rules.len());
    info!("Loaded {edb} input tuples.");
    info!("Loaded {new_alarms} new alarms.");

    // Compute the dates of birth first
    let dobs: DobMap = inputs.rules.dates_of_birth(&inputs.edb).map_err(|err| Error::Derive { err })?;
    let mut report = Report {
        clauses: inputs.rules.len(),
        tuples: dobs.universe().len(),
        consequents: dobs.universe().consequents().len(),
        edb,
        new_alarms,
        unreachable_tuples: dobs.unreachable().count(),
        all_alarms: inputs.all_alarms.len(),
        rounds: dobs.rounds(),
        max_epoch: dobs.max_epoch(),
        ..Default::default()
    };
    info!("Discovered {} tuples.", report.tuples);
    info!("Discovered {} consequents.", report.consequents);

    // Find the clauses we want to keep
    report.forward_clauses = forward_clauses(&inputs.rules, &dobs).count();
    info!("Discovered {} forward clauses.", report.forward_clauses);
    report.underivable_new_alarms = report_underivable(&inputs.new_alarms, &dobs).len();

    // Write them
    for (name, clause) in productive_clauses(&inputs.rules, &dobs) {
        writeln!(clauses_out, "{name}: {clause}").map_err(|err| Error::Write { what: "clause output".into(), err })?;
        report.emitted_clauses += 1;
    }
    clauses_out.flush().map_err(|err| Error::Write { what: "clause output".into(), err })?;

    // Then the alarms
    for alarm in derivable(&inputs.all_alarms, &dobs) {
        writeln!(alarms_out, "{alarm}").map_err(|err| Error::Write { what: "alarm output".into(), err })?;
        report.derivable_alarms += 1;
    }
    alarms_out.flush().map_err(|err| Error::Write { what: "alarm output".into(), err })?;

    debug!("Run completed\n\n{report}\n");
    Ok(report)
}

/// Prunes rules read from some stream and alarms read from files to what is derivable.
///
/// All inputs are read before anything is computed or written. The derivable alarms file is
/// only created once everything has been read successfully.
///
/// # Arguments
/// - `rules`: Some [`Read`]er (e.g., stdin) to read the rules from.
/// - `what`: Describes `rules` for error messages (e.g., `<stdin>`).
/// - `paths`: The [`Paths`] to the tuple files and the derivable alarms output.
/// - `clauses_out`: Where to write the clauses worth keeping to (e.g., stdout).
///
/// # Returns
/// A [`Report`] summarizing the run.
///
/// # Errors
/// This function errors if any input could not be read (a missing file is _not_ taken to be
/// empty), if the rules were malformed, or if any output could not be written.
pub fn run_files(mut rules: impl Read, what: &str, paths: &Paths, clauses_out: impl Write) -> Result<Report, Error> {
    // Read everything
    let mut source: String = String::new();
    rules.read_to_string(&mut source).map_err(|err| Error::Read { what: what.into(), err })?;
    let inputs = Inputs {
        rules: parser::parse_rules(what, &source).map_err(|err| Error::Parse { err })?,
        edb: parser::parse_tuples(&read_file(&paths.edb)?),
        new_alarms: parser::parse_tuples(&read_file(&paths.new_alarms)?),
        all_alarms: parser::parse_tuples(&read_file(&paths.all_alarms)?),
    };

    // Run it
    let alarms_out = File::create(&paths.derivable_alarms).map_err(|err| Error::Create { path: paths.derivable_alarms.clone(), err })?;
    run(&inputs, clauses_out, BufWriter::new(alarms_out))
}





/***** TESTS *****/
