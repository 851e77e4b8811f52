//  MOD.rs
//    by Lut99
//
//  Created:
//    03 May 2024, 13:42:38
//  Last edited:
//    14 Mar 2025, 16:52:27
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements parsers for the line-oriented input formats using
//!   [`nom`].
//!
//!   There are two of them:
//!   - Rule files, with one named [`Clause`](crate::ast::Clause) per line (see [`rules`]); and
//!   - Tuple files, which are simply whitespace-separated [`Tuple`]s.
//

// Declare appropriate submodules
pub mod rules;

// Imports
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

pub use rules::RuleError;

use crate::ast::{RuleSet, Tuple};


/***** ERRORS *****/
/// The error returned by [`parse_rules()`].
#[derive(Debug)]
pub struct Error {
    /// Describes the source that we failed to parse, e.g., `<stdin>` or `/path/to/file`.
    pub what: String,
    /// The (one-indexed) line number of the offending rule.
    pub line: usize,
    /// The offending rule, as it appeared.
    pub rule: String,
    /// What was wrong with it.
    pub err:  RuleError,
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}:{}: Malformed rule '{}'", self.what, self.line, self.rule) }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> { Some(&self.err) }
}





/***** LIBRARY *****/
/// Parses a rule file, one named clause per line.
///
/// Every line must hold a rule, so blank lines are errors too. A newline at the very end of the
/// input does not make a line of its own. Structurally identical clauses are merged, with the name
/// of the last one winning (see [`RuleSet::insert()`]).
///
/// # Arguments
/// - `what`: Some kind of string describing what the input source is, e.g., `<stdin>` or `/path/to/file`.
/// - `source`: The contents of the rule file.
///
/// # Returns
/// A [`RuleSet`] with all clauses in the file.
///
/// # Errors
/// This function returns an [`Error`] on the first line that was not a valid rule. Nothing is
/// skipped silently, as dropping a rule would change what is derivable.
pub fn parse_rules(what: impl Into<String>, source: &str) -> Result<RuleSet, Error> {
    let mut set = RuleSet::new();
    for (i, line) in source.lines().enumerate() {
        match rules::parse_rule(line) {
            Ok((name, clause)) => {
                set.insert(name, clause);
            },
            Err(err) => return Err(Error { what: what.into(), line: i + 1, rule: line.trim().into(), err }),
        }
    }
    Ok(set)
}

/// Parses a tuple file, i.e., a list of whitespace-separated tuples.
///
/// # Arguments
/// - `source`: The contents of the tuple file.
///
/// # Returns
/// The tuples, in order of appearance. Duplicates are kept.
///
/// # Example
/// ```rust
/// use keep_derivable::ast::Tuple;
/// use keep_derivable::parser::parse_tuples;
///
/// assert_eq!(parse_tuples("a b\n\tc\n"), vec![Tuple::new("a"), Tuple::new("b"), Tuple::new("c")]);
/// assert!(parse_tuples("  \n").is_empty());
/// ```
#[inline]
pub fn parse_tuples(source: &str) -> Vec<Tuple> { source.split_whitespace().map(Tuple::from).collect() }





/***** TESTS *****/
