//  MOD.rs
//    by Lut99
//
//  Created:
//    26 Mar 2024, 19:36:31
//  Last edited:
//    14 Mar 2025, 15:51:10
//  Auto updated?
//    Yes
//
//  Description:
//!   Decides which tuples of a ground Horn program are derivable from a
//!   given EDB, and prunes clauses and candidate tuples accordingly.
//!
//!   The core notion is the _date of birth_ (DOB) of a tuple: the number of
//!   rounds of forward derivation needed before it first holds. Tuples in the
//!   EDB are born at `0`; tuples that are never derived are
//!   [unreachable](Dob::Unreachable).
//!
//!   Note that negation is _not_ evaluated. A negated antecedent counts as a
//!   reference to its tuple like any positive one, so `NOT b` requires `b` to
//!   be born before the clause can fire.
//

// Nested modules
pub mod dob;
pub mod fixpoint;
pub mod select;
pub mod universe;

// Imports
pub use dob::{Dob, DobMap};
pub use fixpoint::{Error, Fixpoint};
pub use select::{derivable, forward_clauses, is_forward, productive_clauses, report_underivable};
pub use universe::{IndexedClause, Universe};

use crate::ast::{Clause, RuleSet, Tuple};


/***** LIBRARY FUNCTIONS *****/
/// Computes the date of birth of every tuple in the given rules.
///
/// # Arguments
/// - `rules`: An [`RuleSet`] with the clauses to derive with.
/// - `edb`: The tuples that are given.
///
/// # Returns
/// A [`DobMap`] with the date of birth of every tuple at the fixpoint.
///
/// # Errors
/// This function errors if the fixpoint was not reached in time. See [`Fixpoint::run()`].
#[inline]
pub fn dates_of_birth<'e>(rules: &RuleSet, edb: impl IntoIterator<Item = &'e Tuple>) -> Result<DobMap, Error> { Fixpoint::new(rules, edb).run() }





/***** LIBRARY *****/
// Derivation extensions for the [`RuleSet`].
impl RuleSet {
    /// Computes the date of birth of every tuple in this set.
    ///
    /// # Arguments
    /// - `edb`: The tuples that are given.
    ///
    /// # Returns
    /// A [`DobMap`] with the date of birth of every tuple at the fixpoint.
    ///
    /// # Errors
    /// This function errors if the fixpoint was not reached in time. See [`Fixpoint::run()`].
    #[inline]
    pub fn dates_of_birth<'e>(&self, edb: impl IntoIterator<Item = &'e Tuple>) -> Result<DobMap, Error> { dates_of_birth(self, edb) }

    /// Returns the clauses in this set that are worth keeping given the dates of birth.
    ///
    /// # Returns
    /// An [`Iterator`] over `(name, clause)`-pairs. See [`productive_clauses()`].
    #[inline]
    pub fn productive<'s>(&'s self, dobs: &'s DobMap) -> impl 's + Iterator<Item = (&'s str, &'s Clause)> { productive_clauses(self, dobs) }
}
