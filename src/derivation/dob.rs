//  DOB.rs
//    by Lut99
//
//  Created:
//    11 Mar 2025, 09:48:12
//  Last edited:
//    14 Mar 2025, 13:40:57
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the _date of birth_ (DOB) of a tuple, i.e., the first round
//!   of derivation in which it pops into existence.
//

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FResult};

use super::universe::Universe;
use crate::ast::{Clause, Tuple};


/***** LIBRARY *****/
/// The date of birth of a tuple.
///
/// This is a natural number extended with a top element, [`Dob::Unreachable`]. Arithmetic
/// saturates at the top: nothing born from an unreachable tuple is ever reachable.
///
/// Note that the derived ordering puts every [`Dob::Epoch`] below [`Dob::Unreachable`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Dob {
    /// The tuple is derived in the given round, where `0` means it's given (part of the EDB).
    Epoch(usize),
    /// The tuple is never derived.
    Unreachable,
}
impl Default for Dob {
    #[inline]
    fn default() -> Self { Self::Unreachable }
}
impl Dob {
    /// The date of birth of tuples in the EDB.
    pub const ZERO: Self = Self::Epoch(0);

    /// Returns the date of birth one round later.
    ///
    /// # Returns
    /// [`Dob::Epoch(n + 1)`](Dob::Epoch) if this is `Epoch(n)`, or [`Dob::Unreachable`] otherwise.
    /// If `n + 1` does not fit, we also saturate to [`Dob::Unreachable`].
    #[inline]
    pub const fn succ(self) -> Self {
        match self {
            Self::Epoch(n) => match n.checked_add(1) {
                Some(n) => Self::Epoch(n),
                None => Self::Unreachable,
            },
            Self::Unreachable => Self::Unreachable,
        }
    }

    /// Returns whether this date of birth is finite.
    #[inline]
    pub const fn is_finite(&self) -> bool { matches!(self, Self::Epoch(_)) }

    /// Returns the round of derivation, if any.
    #[inline]
    pub const fn epoch(&self) -> Option<usize> {
        match self {
            Self::Epoch(n) => Some(*n),
            Self::Unreachable => None,
        }
    }
}
impl Display for Dob {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Epoch(n) => n.fmt(f),
            Self::Unreachable => f.pad("∞"),
        }
    }
}



/// Computes the latest date of birth among the given ones.
///
/// # Arguments
/// - `dobs`: The dates of birth of all antecedents of some clause.
///
/// # Returns
/// The maximum of `dobs`, or [`Dob::ZERO`] if there are none.
#[inline]
pub fn latest(dobs: impl IntoIterator<Item = Dob>) -> Dob { dobs.into_iter().fold(Dob::ZERO, Dob::max) }



/// Maps every tuple to its date of birth, as computed by the [fixpoint](super::fixpoint).
///
/// Tuples that the rules never mention are unreachable, unless they are part of the EDB.
#[derive(Clone, Debug)]
pub struct DobMap {
    /// The tuples we know a date of birth of.
    pub(super) universe: Universe,
    /// The date of birth per tuple in `universe`, by index.
    pub(super) dobs:     Vec<Dob>,
    /// Tuples in the EDB that don't occur in any clause.
    pub(super) loose:    HashSet<Tuple>,
    /// The number of rounds it took to compute this map.
    pub(super) rounds:   usize,
}
impl DobMap {
    /// Returns the date of birth of the given tuple.
    ///
    /// # Arguments
    /// - `tuple`: Some tuple to find the date of birth of. Doesn't have to be in the universe.
    ///
    /// # Returns
    /// Its [`Dob`].
    #[inline]
    pub fn get(&self, tuple: &str) -> Dob {
        match self.universe.index_of(tuple) {
            Some(idx) => self.dobs[idx],
            None if self.loose.contains(tuple) => Dob::ZERO,
            None => Dob::Unreachable,
        }
    }

    /// Returns whether the given tuple is derivable at all.
    #[inline]
    pub fn is_derivable(&self, tuple: &str) -> bool { self.get(tuple).is_finite() }

    /// Returns the latest date of birth of the antecedents of the given clause.
    ///
    /// # Returns
    /// The maximum [`Dob`] over the antecedents, or [`Dob::ZERO`] if there are none.
    #[inline]
    pub fn latest_antecedent(&self, clause: &Clause) -> Dob { latest(clause.antecedent_tuples().map(|t| self.get(t.as_str()))) }



    /// Returns the tuples of the universe with their dates of birth.
    ///
    /// # Returns
    /// An [`Iterator`] over `(tuple, dob)`-pairs, in order of discovery.
    #[inline]
    pub fn iter<'s>(&'s self) -> impl 's + ExactSizeIterator<Item = (&'s Tuple, Dob)> { self.universe.tuples().zip(self.dobs.iter().copied()) }

    /// Returns the tuples of the universe that are never derived.
    #[inline]
    pub fn unreachable<'s>(&'s self) -> impl 's + Iterator<Item = &'s Tuple> { self.iter().filter(|(_, d)| !d.is_finite()).map(|(t, _)| t) }

    /// Returns the last round in which any tuple is born, if any is born at all.
    #[inline]
    pub fn max_epoch(&self) -> Option<usize> { self.dobs.iter().filter_map(Dob::epoch).max() }

    /// Returns the [`Universe`] this map is defined over.
    #[inline]
    pub fn universe(&self) -> &Universe { &self.universe }

    /// Returns the number of rounds needed to reach the fixpoint, including the final one that
    /// didn't change anything.
    #[inline]
    pub fn rounds(&self) -> usize { self.rounds }
}
impl Eq for DobMap {}
impl PartialEq for DobMap {
    /// Two maps are equal if they assign the same tuples the same date of birth, regardless of
    /// the order in which they were discovered or how long it took.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.loose == other.loose && self.universe.len() == other.universe.len() && self.iter().all(|(t, d)| other.universe.contains(t.as_str()) && other.get(t.as_str()) == d)
    }
}
impl Display for DobMap {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        writeln!(f, "Dates of birth {{")?;
        if self.universe.is_empty() {
            writeln!(f, "    <none>")?;
        }
        for (tuple, dob) in self.iter() {
            writeln!(f, "    {dob:>3} {tuple}")?;
        }
        writeln!(f, "}}")
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_dob_ordering() {
        assert!(Dob::ZERO < Dob::Epoch(1));
        assert!(Dob::Epoch(usize::MAX) < Dob::Unreachable);
        assert!(!(Dob::Unreachable < Dob::Unreachable));
        assert_eq!(Dob::default(), Dob::Unreachable);
    }

    #[test]
    fn test_dob_succ_saturates() {
        assert_eq!(Dob::ZERO.succ(), Dob::Epoch(1));
        assert_eq!(Dob::Epoch(41).succ(), Dob::Epoch(42));
        assert_eq!(Dob::Unreachable.succ(), Dob::Unreachable);
        assert_eq!(Dob::Epoch(usize::MAX).succ(), Dob::Unreachable);
    }

    #[test]
    fn test_latest() {
        assert_eq!(latest([]), Dob::ZERO);
        assert_eq!(latest([Dob::Epoch(3), Dob::ZERO, Dob::Epoch(1)]), Dob::Epoch(3));
        assert_eq!(latest([Dob::Epoch(3), Dob::Unreachable]), Dob::Unreachable);
    }

    #[test]
    fn test_dob_display() {
        assert_eq!(Dob::Epoch(7).to_string(), "7");
        assert_eq!(Dob::Unreachable.to_string(), "∞");
        assert_eq!(Dob::Epoch(7).epoch(), Some(7));
        assert_eq!(Dob::Unreachable.epoch(), None);
    }
}
