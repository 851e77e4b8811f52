//  FIXPOINT.rs
//    by Lut99
//
//  Created:
//    11 Mar 2025, 10:21:36
//  Last edited:
//    14 Mar 2025, 15:02:19
//  Auto updated?
//    Yes
//
//  Description:
//!   Computes the date of birth of every tuple by relaxing clauses until
//!   nothing changes anymore.
//!
//!   Starting from `0` for the EDB and [`Dob::Unreachable`] for anything
//!   else, every pass visits every clause and lowers the date of birth of
//!   its consequent to one past the latest of its antecedents, if that's
//!   earlier than what we had. Dates only ever go down and can take at most
//!   `|universe| + 1` distinct values, so this terminates; it's the
//!   hypergraph-version of Bellman-Ford with every edge weighing `1`.
//

use std::collections::HashSet;
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use super::dob::{Dob, DobMap, latest};
use super::universe::{IndexedClause, Universe};
use crate::ast::{RuleSet, Tuple};
use crate::log::{debug, trace, warn};


/***** ERRORS *****/
/// Defines the errors occurring when running the [`Fixpoint`].
#[derive(Debug)]
pub enum Error {
    /// The relaxation still changed things after the maximum number of rounds.
    Diverged { rounds: usize, universe: usize },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Diverged { rounds, universe } => {
                write!(f, "Date-of-birth computation did not converge after {rounds} rounds over a universe of {universe} tuple(s)")
            },
        }
    }
}
impl error::Error for Error {}





/***** LIBRARY *****/
/// The state of an ongoing date-of-birth computation.
///
/// Use [`Fixpoint::run()`] to compute the result in one go, or [`Fixpoint::round()`] to step
/// through it.
#[derive(Clone, Debug)]
pub struct Fixpoint {
    /// All tuples in the rules.
    universe:  Universe,
    /// The rules, in terms of indices into `universe`.
    clauses:   Vec<IndexedClause>,
    /// The current date of birth of every tuple in `universe`.
    dobs:      Vec<Dob>,
    /// EDB tuples that don't occur in `universe`.
    loose:     HashSet<Tuple>,
    /// The number of rounds run so far.
    rounds:    usize,
    /// Whether the last round didn't change anything.
    converged: bool,
}

// Constructors
impl Fixpoint {
    /// Constructor for the Fixpoint.
    ///
    /// # Arguments
    /// - `rules`: The [`RuleSet`] of which to compute the dates of birth.
    /// - `edb`: The tuples that are given, i.e., that are born at epoch `0`.
    ///
    /// # Returns
    /// A new Fixpoint that hasn't run any round yet.
    pub fn new<'e>(rules: &RuleSet, edb: impl IntoIterator<Item = &'e Tuple>) -> Self {
        let mut universe = Universe::new();
        let clauses: Vec<IndexedClause> = rules.clauses().map(|c| universe.extend_with_clause(c)).collect();

        // Everything is unreachable, except for the things we're given
        let mut dobs: Vec<Dob> = vec![Dob::Unreachable; universe.len()];
        let mut loose: HashSet<Tuple> = HashSet::new();
        for tuple in edb {
            match universe.index_of(tuple.as_str()) {
                Some(idx) => dobs[idx] = Dob::ZERO,
                None => {
                    loose.insert(tuple.clone());
                },
            }
        }

        Self { universe, clauses, dobs, loose, rounds: 0, converged: false }
    }
}

// Derivation
impl Fixpoint {
    /// Runs a single pass over all clauses.
    ///
    /// Updates are applied in place, so a clause visited later in the same pass already sees
    /// what earlier clauses derived.
    ///
    /// # Returns
    /// The number of tuples whose date of birth was lowered. If this is `0`, the fixpoint is
    /// [reached](Fixpoint::is_converged()).
    pub fn round(&mut self) -> usize {
        let mut updates: usize = 0;
        for clause in &self.clauses {
            let candidate: Dob = latest(clause.antecedents.iter().map(|i| self.dobs[*i])).succ();
            let current: &mut Dob = &mut self.dobs[clause.consequent];
            if candidate < *current {
                trace!("--> Lowering date of birth of '{}' from {current} to {candidate}", self.universe.get(clause.consequent).map(Tuple::as_str).unwrap_or("?"));
                *current = candidate;
                updates += 1;
            }
        }
        self.rounds += 1;
        self.converged = updates == 0;
        updates
    }

    /// Runs [rounds](Fixpoint::round()) until nothing changes anymore.
    ///
    /// Once converged, every tuple that is still unreachable is reported as a warning.
    ///
    /// # Returns
    /// A [`DobMap`] with the final date of birth of every tuple.
    ///
    /// # Errors
    /// This function errors if the fixpoint is not reached within [`Fixpoint::max_rounds()`]
    /// rounds. That cannot happen unless the relaxation itself is broken.
    pub fn run(mut self) -> Result<DobMap, Error> {
        debug!("Computing dates of birth of {} tuple(s) using {} clause(s)", self.universe.len(), self.clauses.len());
        while !self.converged {
            if self.rounds >= self.max_rounds() {
                return Err(Error::Diverged { rounds: self.rounds, universe: self.universe.len() });
            }
            let _updates: usize = self.round();
            debug!("Round {} lowered {} date(s) of birth", self.rounds, _updates);
        }
        debug!("Done computing dates of birth (took {} rounds)", self.rounds);

        let map = DobMap { universe: self.universe, dobs: self.dobs, loose: self.loose, rounds: self.rounds };
        for tuple in map.unreachable() {
            warn!("Discovered unreachable tuple {tuple}.");
        }
        debug!("Last (not necessarily useful) tuple born at epoch {}.", map.max_epoch().unwrap_or(0));
        Ok(map)
    }



    /// Returns the current date of birth of the given tuple.
    ///
    /// Before [convergence](Fixpoint::is_converged()) this is an upper bound of the final one.
    #[inline]
    pub fn dob(&self, tuple: &str) -> Dob {
        match self.universe.index_of(tuple) {
            Some(idx) => self.dobs[idx],
            None if self.loose.contains(tuple) => Dob::ZERO,
            None => Dob::Unreachable,
        }
    }

    /// Returns whether the last round didn't change anything.
    #[inline]
    pub fn is_converged(&self) -> bool { self.converged }

    /// Returns the number of rounds run so far.
    #[inline]
    pub fn rounds(&self) -> usize { self.rounds }

    /// Returns the number of rounds after which the fixpoint must have been reached.
    ///
    /// After round `k`, every tuple born at or before `k` has its final date. Dates are
    /// consecutive, so there's at most `|universe|` of them, plus one round to observe nothing
    /// changes.
    #[inline]
    pub fn max_rounds(&self) -> usize { self.universe.len() + 1 }

    /// Returns the [`Universe`] this fixpoint is computed over.
    #[inline]
    pub fn universe(&self) -> &Universe { &self.universe }
}





/***** TESTS *****/
#[cfg(all(test, feature = "macros"))]
mod tests {
    use super::*;
    use crate::ast::rules;
    use crate::tests::make_tuples;


    /// Runs the fixpoint on the given rules and EDB.
    fn dobs(rules: &RuleSet, edb: impl IntoIterator<Item = &'static str>) -> DobMap {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();
        Fixpoint::new(rules, &make_tuples(edb)).run().unwrap()
    }


    #[test]
    fn test_fixpoint_chain() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: c, b, d.
        };
        let map = dobs(&rules, ["a", "c"]);
        assert_eq!(map.get("a"), Dob::ZERO);
        assert_eq!(map.get("c"), Dob::ZERO);
        assert_eq!(map.get("b"), Dob::Epoch(1));
        assert_eq!(map.get("d"), Dob::Epoch(2));
        assert_eq!(map.get("e"), Dob::Unreachable);
        assert_eq!(map.max_epoch(), Some(2));
        assert_eq!(map.unreachable().count(), 0);
        // One pass derives everything in clause order, the second sees nothing new
        assert_eq!(map.rounds(), 2);
    }

    #[test]
    fn test_fixpoint_unreachable() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: x, y.
        };
        let map = dobs(&rules, []);
        assert_eq!(map.get("x"), Dob::Unreachable);
        assert_eq!(map.get("y"), Dob::Unreachable);
        assert_eq!(map.unreachable().map(Tuple::as_str).collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(map.max_epoch(), None);
        assert_eq!(map.rounds(), 1);
    }

    #[test]
    fn test_fixpoint_minimum_over_clauses() {
        // `d` is derivable both in 3 and in 1 rounds; the latter should win, regardless of order
        let rules: RuleSet = rules! {
            #![crate]
            R1: b, c.
            R2: c, d.
            R3: a, b.
            R4: a, d.
        };
        let map = dobs(&rules, ["a"]);
        assert_eq!(map.get("b"), Dob::Epoch(1));
        assert_eq!(map.get("c"), Dob::Epoch(2));
        assert_eq!(map.get("d"), Dob::Epoch(1));
    }

    #[test]
    fn test_fixpoint_max_over_antecedents() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: b, c.
            R3: a, c, d.
            R4: a, e, d.
        };
        let map = dobs(&rules, ["a"]);
        assert_eq!(map.get("c"), Dob::Epoch(2));
        assert_eq!(map.get("d"), Dob::Epoch(3));
        // One missing antecedent does not block the other clause
        assert_eq!(map.get("e"), Dob::Unreachable);
    }

    #[test]
    fn test_fixpoint_facts() {
        // Clauses without antecedents are born one round in, unless given
        let rules: RuleSet = rules! {
            #![crate]
            F1: a.
            F2: b.
            R1: a, c.
        };
        let map = dobs(&rules, ["b"]);
        assert_eq!(map.get("a"), Dob::Epoch(1));
        assert_eq!(map.get("b"), Dob::ZERO);
        assert_eq!(map.get("c"), Dob::Epoch(2));
    }

    #[test]
    fn test_fixpoint_negation_is_bookkeeping() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: NOT a, b.
            R2: NOT b, NOT z, c.
        };
        let map = dobs(&rules, ["a"]);
        assert_eq!(map.get("b"), Dob::Epoch(1));
        // `z` is not given, so it's unreachable, and so is everything depending on it
        assert_eq!(map.get("c"), Dob::Unreachable);
    }

    #[test]
    fn test_fixpoint_cycles() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: b, a.
            R3: x, y.
            R4: y, x.
        };
        let map = dobs(&rules, ["a"]);
        assert_eq!(map.get("a"), Dob::ZERO);
        assert_eq!(map.get("b"), Dob::Epoch(1));
        assert_eq!(map.get("x"), Dob::Unreachable);
        assert_eq!(map.get("y"), Dob::Unreachable);
    }

    #[test]
    fn test_fixpoint_loose_edb() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
        };
        let map = dobs(&rules, ["a", "lonely"]);
        assert_eq!(map.get("lonely"), Dob::ZERO);
        assert!(!map.universe().contains("lonely"));
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn test_fixpoint_monotone_rounds() {
        // Reversed chain, so every round only makes one step of progress
        let rules: RuleSet = rules! {
            #![crate]
            R4: d, e.
            R3: c, d.
            R2: b, c.
            R1: a, b.
        };
        let edb: Vec<Tuple> = make_tuples(["a"]);
        let mut fix = Fixpoint::new(&rules, &edb);
        let tuples: Vec<Tuple> = fix.universe().tuples().cloned().collect();

        let mut prev: Vec<Dob> = tuples.iter().map(|t| fix.dob(t.as_str())).collect();
        let mut counts: Vec<usize> = Vec::new();
        while !fix.is_converged() {
            counts.push(fix.round());
            let next: Vec<Dob> = tuples.iter().map(|t| fix.dob(t.as_str())).collect();
            assert!(prev.iter().zip(&next).all(|(p, n)| n <= p), "{prev:?} -> {next:?}");
            prev = next;
        }
        assert_eq!(counts, vec![1, 1, 1, 1, 0]);
        assert!(fix.rounds() <= fix.max_rounds());
        assert_eq!(fix.dob("e"), Dob::Epoch(4));
    }

    #[test]
    fn test_fixpoint_idempotent() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: b, NOT c, d.
            R3: d, c.
            R4: q, d.
        };
        let edb: Vec<Tuple> = make_tuples(["a", "c"]);
        let first = Fixpoint::new(&rules, &edb).run().unwrap();
        let second = Fixpoint::new(&rules, &edb).run().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.get("c"), Dob::ZERO);
    }

    #[test]
    fn test_fixpoint_empty() {
        let map = dobs(&RuleSet::new(), ["a"]);
        assert_eq!(map.get("a"), Dob::ZERO);
        assert_eq!(map.rounds(), 1);
        assert!(map.universe().is_empty());
    }
}
