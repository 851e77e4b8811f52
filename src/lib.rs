//  LIB.rs
//    by Lut99
//
//  Created:
//    13 Mar 2024, 16:43:01
//  Last edited:
//    14 Mar 2025, 17:40:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Prunes a ground Horn program and a list of alarms down to what is
//!   actually derivable from a given set of input tuples.
//!
//!   Use [`derivation`] to compute dates of birth over an in-memory
//!   [`RuleSet`](ast::RuleSet), or [`pipeline`] to do a whole run over
//!   rule and tuple files.
//

// Declare modules
pub mod ast;
pub mod derivation;
mod log;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "parser")]
pub mod pipeline;
