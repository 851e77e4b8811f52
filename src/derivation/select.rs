//  SELECT.rs
//    by Lut99
//
//  Created:
//    11 Mar 2025, 14:55:03
//  Last edited:
//    14 Mar 2025, 15:47:22
//  Auto updated?
//    Yes
//
//  Description:
//!   Uses computed dates of birth to prune clauses and candidate tuples
//!   to the ones that are actually derivable.
//

use itertools::Itertools as _;

use super::dob::DobMap;
use crate::ast::{Clause, RuleSet, Tuple};
use crate::log::{trace, warn};


/***** LIBRARY *****/
/// Checks whether a clause is _forward_, i.e., whether it can justify its consequent no later
/// than the consequent's date of birth.
///
/// Concretely, that's the case iff the latest date of birth among its antecedents is strictly
/// earlier than that of its consequent. Clauses with an unreachable antecedent are never
/// forward, and neither are clauses deriving something that is given.
///
/// # Arguments
/// - `clause`: The [`Clause`] to check.
/// - `dobs`: The dates of birth at the fixpoint.
///
/// # Returns
/// True if the clause is forward, or false otherwise.
#[inline]
pub fn is_forward(clause: &Clause, dobs: &DobMap) -> bool { dobs.latest_antecedent(clause) < dobs.get(clause.consequent().as_str()) }

/// Returns the [forward](is_forward()) clauses in the given set.
///
/// # Arguments
/// - `rules`: The [`RuleSet`] to select from.
/// - `dobs`: The dates of birth at the fixpoint.
///
/// # Returns
/// An [`Iterator`] over `(name, clause)`-pairs, in the order of `rules`.
#[inline]
pub fn forward_clauses<'r>(rules: &'r RuleSet, dobs: &'r DobMap) -> impl 'r + Iterator<Item = (&'r str, &'r Clause)> {
    rules.iter().filter(move |(_, c)| is_forward(c, dobs))
}

/// Returns the clauses worth keeping: those that are [forward](is_forward()) _and_ have a
/// derivable consequent.
///
/// The second check is implied by the first at a fixpoint, but is kept explicit so that this
/// function never emits a clause for something unreachable.
///
/// # Arguments
/// - `rules`: The [`RuleSet`] to select from.
/// - `dobs`: The dates of birth at the fixpoint.
///
/// # Returns
/// An [`Iterator`] over `(name, clause)`-pairs, in the order of `rules`.
pub fn productive_clauses<'r>(rules: &'r RuleSet, dobs: &'r DobMap) -> impl 'r + Iterator<Item = (&'r str, &'r Clause)> {
    forward_clauses(rules, dobs).filter(move |(_name, clause)| {
        if dobs.is_derivable(clause.consequent().as_str()) {
            trace!("Emitting clause {_name}: {clause}");
            true
        } else {
            false
        }
    })
}



/// Filters the given candidates to those that are derivable.
///
/// # Arguments
/// - `candidates`: Some tuples (e.g., alarms) to filter.
/// - `dobs`: The dates of birth at the fixpoint.
///
/// # Returns
/// An [`Iterator`] yielding the derivable `candidates`, in their original order. Duplicates are
/// kept.
#[inline]
pub fn derivable<'t, I>(candidates: I, dobs: &'t DobMap) -> impl Iterator<Item = &'t Tuple>
where
    I: IntoIterator<Item = &'t Tuple>,
{
    candidates.into_iter().filter(move |t| dobs.is_derivable(t.as_str()))
}

/// Reports the given tuples that are _not_ derivable.
///
/// This is only a diagnostic. Running against a partial EDB can legitimately make some of them
/// unreachable, so nothing is removed from anywhere.
///
/// # Arguments
/// - `expected`: Some tuples (e.g., the new alarms) that we'd expect to be derivable.
/// - `dobs`: The dates of birth at the fixpoint.
///
/// # Returns
/// The distinct tuples in `expected` that are unreachable, in order of first appearance. Each is
/// warned about once.
pub fn report_underivable<'t>(expected: impl IntoIterator<Item = &'t Tuple>, dobs: &DobMap) -> Vec<&'t Tuple> {
    let mut missing: Vec<&'t Tuple> = Vec::new();
    for tuple in expected.into_iter().unique() {
        if !dobs.is_derivable(tuple.as_str()) {
            warn!("Unable to derive new alarm {tuple}.");
            missing.push(tuple);
        }
    }
    missing
}





/***** TESTS *****/
#[cfg(all(test, feature = "macros"))]
mod tests {
    use super::*;
    use crate::ast::rules;
    use crate::derivation::Fixpoint;
    use crate::tests::{make_clause, make_tuples};


    /// Computes the dates of birth for the given rules and EDB.
    fn dobs(rules: &RuleSet, edb: impl IntoIterator<Item = &'static str>) -> DobMap {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();
        Fixpoint::new(rules, &make_tuples(edb)).run().unwrap()
    }

    /// Collects the names of the given clauses.
    fn names<'r>(clauses: impl Iterator<Item = (&'r str, &'r Clause)>) -> Vec<&'r str> { clauses.map(|(n, _)| n).collect() }


    #[test]
    fn test_select_chain() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: c, b, d.
        };
        let map = dobs(&rules, ["a", "c"]);
        assert_eq!(names(forward_clauses(&rules, &map)), vec!["R1", "R2"]);
        assert_eq!(names(productive_clauses(&rules, &map)), vec!["R1", "R2"]);
    }

    #[test]
    fn test_select_unreachable() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: x, y.
        };
        let map = dobs(&rules, []);
        assert!(!is_forward(&make_clause([(true, "x")], "y"), &map));
        assert_eq!(names(productive_clauses(&rules, &map)), Vec::<&str>::new());
    }

    #[test]
    fn test_select_late_clauses() {
        let rules: RuleSet = rules! {
            #![crate]
            Late: c, d.
            R1: a, b.
            R2: b, c.
            Early: a, d.
            Given: b, a.
            Dead: z, d.
        };
        let map = dobs(&rules, ["a"]);
        // `Late` derives `d` at 3 while it's born at 1: not forward. `Given` derives something in
        // the EDB, `Dead` depends on something unreachable.
        assert_eq!(names(forward_clauses(&rules, &map)), vec!["R1", "R2", "Early"]);
        assert_eq!(names(productive_clauses(&rules, &map)), vec!["R1", "R2", "Early"]);
    }

    #[test]
    fn test_select_ties() {
        // Two different ways of deriving `c` in the same round are both forward
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, c.
            R2: b, c.
            R3: NOT a, NOT b, c.
        };
        let map = dobs(&rules, ["a", "b"]);
        assert_eq!(names(productive_clauses(&rules, &map)), vec!["R1", "R2", "R3"]);
    }

    #[test]
    fn test_derivable_order_and_duplicates() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: c, b, d.
        };
        let map = dobs(&rules, ["a", "c"]);
        let alarms: Vec<Tuple> = make_tuples(["d", "e", "b", "d", "a"]);
        assert_eq!(derivable(&alarms, &map).map(Tuple::as_str).collect::<Vec<_>>(), vec!["d", "b", "d", "a"]);
    }

    #[test]
    fn test_report_underivable() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: x, y.
        };
        let map = dobs(&rules, ["a"]);
        let alarms: Vec<Tuple> = make_tuples(["y", "b", "nowhere", "y", "b"]);
        assert_eq!(report_underivable(&alarms, &map).into_iter().map(Tuple::as_str).collect::<Vec<_>>(), vec!["y", "nowhere"]);
    }
}
