//  RULES.rs
//    by Lut99
//
//  Created:
//    07 May 2024, 16:33:43
//  Last edited:
//    14 Mar 2025, 16:40:18
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements combinators for parsing a single named clause off a line.
//!
//!   A line looks like `Name: lit1, lit2, ..., consequent`, where every
//!   literal is a whitespace-free tuple identifier, optionally preceded by
//!   `NOT` and optionally followed by a comma. Because tuples may contain
//!   commas themselves (e.g., `DUPath(1,2)`), whitespace is the only real
//!   separator.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_while1};
use nom::combinator::{map, map_opt};
use nom::multi::many0;
use nom::sequence::{pair, preceded};

use crate::ast::{Clause, ClauseError, Literal, NOT_KEYWORD, Polarity, Tuple};


/***** ERRORS *****/
/// Defines what may be wrong with a single rule line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RuleError {
    /// The first token is not a name followed by a colon.
    MissingRuleName { token: String },
    /// A `NOT` was not followed by any tuple.
    DanglingNegation,
    /// Some token could not be read as a tuple.
    IllegalToken { token: String },
    /// The literals did not form a valid clause.
    Clause(ClauseError),
}
impl Display for RuleError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::MissingRuleName { token } => write!(f, "Expected a rule name followed by ':', got '{token}'"),
            Self::DanglingNegation => write!(f, "'{NOT_KEYWORD}' is not followed by a tuple"),
            Self::IllegalToken { token } => write!(f, "'{token}' is not a valid tuple"),
            Self::Clause(_) => write!(f, "Rule does not make a valid clause"),
        }
    }
}
impl error::Error for RuleError {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Clause(err) => Some(err),
            _ => None,
        }
    }
}





/***** LIBRARY FUNCTIONS *****/
/// Parses a named clause from one line of input.
///
/// # Arguments
/// - `line`: The line to parse. Leading and trailing whitespace is ignored.
///
/// # Returns
/// The name of the rule and the [`Clause`] on the line.
///
/// # Errors
/// This function errors if the line is not a valid named clause. A blank line contributes no
/// literals at all, and is therefore an [empty clause](ClauseError::Empty) like `R1:` is.
///
/// # Example
/// ```rust
/// use keep_derivable::ast::{Clause, ClauseError, Literal};
/// use keep_derivable::parser::rules::{RuleError, parse_rule};
///
/// assert_eq!(parse_rule("R1: NOT a, b, c"), Ok(("R1", Clause::new([Literal::neg("a"), Literal::pos("b")], "c"))));
/// assert_eq!(parse_rule("   "), Err(RuleError::Clause(ClauseError::Empty)));
/// assert_eq!(parse_rule("R1: a, NOT"), Err(RuleError::DanglingNegation));
/// ```
pub fn parse_rule(line: &str) -> Result<(&str, Clause), RuleError> {
    let line: &str = line.trim();
    if line.is_empty() {
        return Err(RuleError::Clause(ClauseError::Empty));
    }

    // Parse the name, then as many literals as we can
    let (rest, name): (&str, &str) = rule_name(line).map_err(|_| RuleError::MissingRuleName { token: first_token(line).into() })?;
    let (rest, lits): (&str, Vec<Literal>) = literals(rest).map_err(|_| RuleError::IllegalToken { token: first_token(rest).into() })?;

    // Anything left is something we didn't recognize
    let rest: &str = rest.trim_start();
    if !rest.is_empty() {
        let token: &str = first_token(rest);
        return Err(if token == NOT_KEYWORD { RuleError::DanglingNegation } else { RuleError::IllegalToken { token: token.into() } });
    }
    Clause::from_literals(lits).map(|clause| (name, clause)).map_err(RuleError::Clause)
}

/// Returns the first whitespace-separated token of the given input, or the whole input if it has
/// none.
#[inline]
fn first_token(input: &str) -> &str { token(input.trim_start()).map(|(_, t)| t).unwrap_or(input) }





/***** LIBRARY *****/
/// Parses a run of non-whitespace characters.
///
/// # Returns
/// A combinator that parses one token.
///
/// # Fails
/// This combinator fails if the input is empty or starts with whitespace.
#[inline]
pub fn token(input: &str) -> IResult<&str, &str> { take_till1(char::is_whitespace)(input) }

/// Parses a run of whitespace.
///
/// # Fails
/// This combinator fails if the input does not start with whitespace.
#[inline]
pub fn whitespace1(input: &str) -> IResult<&str, &str> { take_while1(char::is_whitespace)(input) }

/// Parses the name of a rule, which is a token ending in a colon.
///
/// # Returns
/// A combinator that parses the name, without the colon.
///
/// # Fails
/// This combinator fails if the first token does not end in a colon, or if it is only a colon.
#[inline]
pub fn rule_name(input: &str) -> IResult<&str, &str> { map_opt(token, |t: &str| t.strip_suffix(':').filter(|n| !n.is_empty()))(input) }

/// Parses a tuple, stripping a trailing comma if any.
///
/// # Returns
/// A combinator that parses a [`Tuple`].
///
/// # Fails
/// This combinator fails if the token is empty without its comma, or if it is the `NOT` keyword.
#[inline]
pub fn tuple(input: &str) -> IResult<&str, Tuple> {
    map_opt(token, |t: &str| {
        let t: &str = t.strip_suffix(',').unwrap_or(t);
        if t.is_empty() || t == NOT_KEYWORD { None } else { Some(Tuple::from(t)) }
    })(input)
}

/// Parses a literal, either positive or negated.
///
/// # Returns
/// A combinator that parses a tuple, optionally preceded by `NOT`.
///
/// # Fails
/// This combinator fails if the input was not a literal.
///
/// # Example
/// ```rust
/// use keep_derivable::ast::Literal;
/// use keep_derivable::parser::rules::literal;
///
/// assert_eq!(literal("NOT foo, bar"), Ok((" bar", Literal::neg("foo"))));
/// assert_eq!(literal("DUPath(1,2) bar"), Ok((" bar", Literal::pos("DUPath(1,2)"))));
/// assert!(literal("NOT").is_err());
/// assert!(literal("").is_err());
/// ```
#[inline]
pub fn literal(input: &str) -> IResult<&str, Literal> {
    alt((
        map(preceded(pair(tag(NOT_KEYWORD), whitespace1), tuple), |t| Literal::new(Polarity::Negated, t)),
        map(tuple, |t| Literal::new(Polarity::Positive, t)),
    ))(input)
}

/// Parses zero or more literals, each preceded by whitespace.
///
/// # Returns
/// A combinator that parses a list of [`Literal`]s, stopping at the first thing that isn't one.
#[inline]
pub fn literals(input: &str) -> IResult<&str, Vec<Literal>> { many0(preceded(whitespace1, literal))(input) }





/***** TESTS *****/
