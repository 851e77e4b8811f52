//  LIB.rs
//    by Lut99
//
//  Created:
//    18 Mar 2024, 13:25:32
//  Last edited:
//    14 Mar 2025, 14:20:09
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the `rules!{}`-macro for the `keep-derivable`-crate.
//

// Modules
mod rules;

// Imports
use proc_macro::TokenStream;
use syn::parse::Parser as _;


/***** LIBRARY *****/
/// Builds a `RuleSet` from named ground clauses written inline.
///
/// Every rule reads `Name: lit, ..., consequent.`, where literals may be negated with `NOT` and
/// tuples are identifiers with optional parenthesized arguments (e.g., `DUPath(1, 2)`, which
/// becomes the tuple `DUPath(1,2)`).
///
/// Give `#![crate]` as the first thing to refer to `crate::ast` instead of
/// `::keep_derivable::ast`.
#[proc_macro]
pub fn rules(input: TokenStream) -> TokenStream {
    match rules::rules.parse2(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
