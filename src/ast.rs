//  AST.rs
//    by Lut99
//
//  Created:
//    13 Mar 2024, 16:43:37
//  Last edited:
//    14 Mar 2025, 11:26:08
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the ground Horn-clause model used by the derivability check.
//!
//!   Contrary to a full Datalog AST, there are no variables here. Every
//!   [`Tuple`] is an opaque, already-grounded fact identifier (e.g.,
//!   `DUPath(12,13)`), and every [`Clause`] is one instantiation of some
//!   named rule.
//

use std::borrow::Borrow;
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::IndexMap;
use indexmap::map::Entry;
use itertools::Itertools as _;
// Re-export the DSL macro
#[cfg(feature = "macros")]
pub use keep_derivable_macros::rules;

use crate::log::debug;


/***** CONSTANTS *****/
/// The keyword that negates the literal following it.
pub const NOT_KEYWORD: &str = "NOT";





/***** ERRORS *****/
/// Defines why a list of literals does not make a [`Clause`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClauseError {
    /// There were no literals at all, so not even a consequent.
    Empty,
    /// The last literal, the consequent, was negated.
    NegatedConsequent { tuple: Tuple },
}
impl Display for ClauseError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Empty => write!(f, "Clause has no literals (expected at least a consequent)"),
            Self::NegatedConsequent { tuple } => write!(f, "Consequent '{tuple}' of clause is negated"),
        }
    }
}
impl error::Error for ClauseError {}





/***** LIBRARY *****/
/// An opaque identifier naming a fact.
///
/// Two tuples are the same iff their names are.
///
/// # Syntax
/// ```plain
/// Alarm(42)
/// DUPath(3,4)
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tuple(String);
impl Tuple {
    /// Constructor for the Tuple.
    ///
    /// # Arguments
    /// - `name`: The identifier of the fact.
    ///
    /// # Returns
    /// A new Tuple with the given name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    /// Returns the identifier of this tuple.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}
impl Borrow<str> for Tuple {
    #[inline]
    fn borrow(&self) -> &str { &self.0 }
}
impl Display for Tuple {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(&self.0) }
}
impl From<&str> for Tuple {
    #[inline]
    fn from(value: &str) -> Self { Self(value.into()) }
}
impl From<String> for Tuple {
    #[inline]
    fn from(value: String) -> Self { Self(value) }
}



/// Whether a [`Literal`] is taken as-is or negated.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Polarity {
    /// The tuple is used as-is.
    Positive,
    /// The tuple has a `NOT` in front of it.
    Negated,
}



/// A reference to a [`Tuple`] with a [`Polarity`], as found in the body of a clause.
///
/// Note that polarity is pure bookkeeping. For derivability purposes, a negated literal
/// stands for its underlying tuple exactly like a positive one does.
///
/// # Syntax
/// ```plain
/// foo
/// NOT foo
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Literal {
    /// Whether the tuple is negated.
    pub polarity: Polarity,
    /// The tuple referenced.
    pub tuple:    Tuple,
}
impl Literal {
    /// Constructor for the Literal.
    ///
    /// # Arguments
    /// - `polarity`: Whether the `tuple` is negated or not.
    /// - `tuple`: The [`Tuple`] that is referenced.
    ///
    /// # Returns
    /// A new Literal.
    #[inline]
    pub fn new(polarity: Polarity, tuple: impl Into<Tuple>) -> Self { Self { polarity, tuple: tuple.into() } }

    /// Constructor for a positive Literal.
    #[inline]
    pub fn pos(tuple: impl Into<Tuple>) -> Self { Self::new(Polarity::Positive, tuple) }

    /// Constructor for a negated Literal.
    #[inline]
    pub fn neg(tuple: impl Into<Tuple>) -> Self { Self::new(Polarity::Negated, tuple) }

    /// Returns whether this literal is positive.
    #[inline]
    pub fn is_positive(&self) -> bool { matches!(self.polarity, Polarity::Positive) }

    /// Projects the literal to the tuple it references, regardless of polarity.
    ///
    /// # Returns
    /// A reference to the [`Tuple`] contained within.
    #[inline]
    pub fn tuple(&self) -> &Tuple { &self.tuple }
}
impl Display for Literal {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if self.is_positive() { write!(f, "{}", self.tuple) } else { write!(f, "{NOT_KEYWORD} {}", self.tuple) }
    }
}



/// A single ground Horn clause: zero or more antecedent [`Literal`]s implying one consequent
/// [`Tuple`].
///
/// Structural equality covers the antecedents (in order, with polarity) and the consequent. The
/// name of the rule that produced the clause is deliberately not part of it; see [`RuleSet`].
///
/// # Syntax
/// ```plain
/// a, NOT b, c
/// ```
/// (where `c` is the consequent)
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Clause {
    /// The literals that must be derived before the consequent is.
    antecedents: Vec<Literal>,
    /// The tuple derived by this clause.
    consequent:  Tuple,
}
impl Clause {
    /// Constructor for the Clause.
    ///
    /// # Arguments
    /// - `antecedents`: The body of the clause.
    /// - `consequent`: The head of the clause. Cannot be negated, by construction.
    ///
    /// # Returns
    /// A new Clause.
    #[inline]
    pub fn new(antecedents: impl IntoIterator<Item = Literal>, consequent: impl Into<Tuple>) -> Self {
        Self { antecedents: antecedents.into_iter().collect(), consequent: consequent.into() }
    }

    /// Builds a clause from a flat list of literals, the last of which is the consequent.
    ///
    /// # Arguments
    /// - `literals`: The literals, in order of appearance.
    ///
    /// # Returns
    /// A new Clause with all but the last literal as antecedents.
    ///
    /// # Errors
    /// This function errors if `literals` is empty, or if the last literal is negated.
    pub fn from_literals(literals: impl IntoIterator<Item = Literal>) -> Result<Self, ClauseError> {
        let mut antecedents: Vec<Literal> = literals.into_iter().collect();
        match antecedents.pop() {
            Some(Literal { polarity: Polarity::Positive, tuple }) => Ok(Self { antecedents, consequent: tuple }),
            Some(Literal { polarity: Polarity::Negated, tuple }) => Err(ClauseError::NegatedConsequent { tuple }),
            None => Err(ClauseError::Empty),
        }
    }



    /// Returns the antecedent literals of this clause.
    #[inline]
    pub fn antecedents(&self) -> &[Literal] { &self.antecedents }

    /// Returns the tuples referenced by the antecedents, with polarity dropped.
    ///
    /// # Returns
    /// An [`Iterator`] over the antecedents' [`Tuple`]s, in order of appearance.
    #[inline]
    pub fn antecedent_tuples<'s>(&'s self) -> impl 's + ExactSizeIterator<Item = &'s Tuple> { self.antecedents.iter().map(Literal::tuple) }

    /// Returns the tuple derived by this clause.
    #[inline]
    pub fn consequent(&self) -> &Tuple { &self.consequent }

    /// Decomposes the clause into the tuples it needs and the tuple it derives.
    ///
    /// # Returns
    /// A pair of the [antecedent tuples](Clause::antecedent_tuples()) and the
    /// [consequent](Clause::consequent()).
    #[inline]
    pub fn decompose<'s>(&'s self) -> (impl 's + ExactSizeIterator<Item = &'s Tuple>, &'s Tuple) { (self.antecedent_tuples(), &self.consequent) }

    /// Returns every tuple mentioned by this clause, antecedents first.
    ///
    /// # Returns
    /// An [`Iterator`] over [`Tuple`]s. May yield the same tuple more than once.
    #[inline]
    pub fn tuples<'s>(&'s self) -> impl 's + Iterator<Item = &'s Tuple> { self.antecedent_tuples().chain(std::iter::once(&self.consequent)) }
}
impl Display for Clause {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if !self.antecedents.is_empty() {
            write!(f, "{}, ", self.antecedents.iter().format(", "))?;
        }
        write!(f, "{}", self.consequent)
    }
}



/// A collection of named [`Clause`]s, deduplicated by structure.
///
/// Clauses keep the position at which they were first inserted. If the same clause is inserted
/// again under another name, the latest name wins.
///
/// # Syntax
/// ```plain
/// R1: a, b
/// R2: c, NOT b, d
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleSet {
    /// Maps clauses to the name of the rule they were instantiated from.
    clauses: IndexMap<Clause, String>,
}
impl RuleSet {
    /// Constructor for an empty RuleSet.
    #[inline]
    pub fn new() -> Self { Self { clauses: IndexMap::new() } }

    /// Adds a new clause to the set.
    ///
    /// # Arguments
    /// - `name`: The name of the rule that produced `clause`.
    /// - `clause`: The [`Clause`] to add.
    ///
    /// # Returns
    /// The name previously associated with a structurally identical clause, if any.
    pub fn insert(&mut self, name: impl Into<String>, clause: Clause) -> Option<String> {
        let name: String = name.into();
        match self.clauses.entry(clause) {
            Entry::Occupied(mut occ) => {
                debug!("Clause '{}' occurs more than once; renaming it from '{}' to '{}'", occ.key(), occ.get(), name);
                Some(std::mem::replace(occ.get_mut(), name))
            },
            Entry::Vacant(vac) => {
                vac.insert(name);
                None
            },
        }
    }



    /// Returns the name of the given clause, if it is in this set.
    #[inline]
    pub fn name_of(&self, clause: &Clause) -> Option<&str> { self.clauses.get(clause).map(String::as_str) }

    /// Returns an iterator over the clauses and their names, in order of first insertion.
    ///
    /// # Returns
    /// An [`Iterator`] yielding `(name, clause)` pairs.
    #[inline]
    pub fn iter<'s>(&'s self) -> impl 's + ExactSizeIterator<Item = (&'s str, &'s Clause)> { self.clauses.iter().map(|(c, n)| (n.as_str(), c)) }

    /// Returns an iterator over the clauses only, in order of first insertion.
    #[inline]
    pub fn clauses<'s>(&'s self) -> impl 's + Clone + ExactSizeIterator<Item = &'s Clause> { self.clauses.keys() }

    /// Returns the number of (unique) clauses in this set.
    #[inline]
    pub fn len(&self) -> usize { self.clauses.len() }

    /// Returns whether there are any clauses in this set.
    #[inline]
    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }
}
impl Display for RuleSet {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        for (name, clause) in self.iter() {
            writeln!(f, "{name}: {clause}")?;
        }
        Ok(())
    }
}
impl<N: Into<String>> Extend<(N, Clause)> for RuleSet {
    #[inline]
    fn extend<T: IntoIterator<Item = (N, Clause)>>(&mut self, iter: T) {
        for (name, clause) in iter {
            self.insert(name, clause);
        }
    }
}
impl<N: Into<String>> FromIterator<(N, Clause)> for RuleSet {
    #[inline]
    fn from_iter<T: IntoIterator<Item = (N, Clause)>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_clause, make_lit};


    #[test]
    fn test_clause_from_literals() {
        assert_eq!(
            Clause::from_literals([make_lit(true, "a"), make_lit(false, "b"), make_lit(true, "c")]),
            Ok(Clause::new([Literal::pos("a"), Literal::neg("b")], "c"))
        );
        assert_eq!(Clause::from_literals([make_lit(true, "a")]), Ok(Clause::new([], "a")));
        assert_eq!(Clause::from_literals([]), Err(ClauseError::Empty));
        assert_eq!(
            Clause::from_literals([make_lit(true, "a"), make_lit(false, "b")]),
            Err(ClauseError::NegatedConsequent { tuple: Tuple::new("b") })
        );
    }

    #[test]
    fn test_clause_decompose() {
        let clause: Clause = make_clause([(false, "a"), (true, "b")], "c");
        let (ants, cons) = clause.decompose();
        assert_eq!(ants.map(Tuple::as_str).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(cons.as_str(), "c");
        assert_eq!(clause.tuples().map(Tuple::as_str).collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(make_clause([(true, "a")], "b").to_string(), "a, b");
        assert_eq!(make_clause([(false, "DUPath(1,2)"), (true, "DUEdge(2,3)")], "DUPath(1,3)").to_string(), "NOT DUPath(1,2), DUEdge(2,3), DUPath(1,3)");
        assert_eq!(make_clause([], "a").to_string(), "a");
    }

    #[test]
    fn test_rule_set_dedup() {
        let mut set = RuleSet::new();
        assert_eq!(set.insert("R1", make_clause([(true, "a")], "b")), None);
        assert_eq!(set.insert("R2", make_clause([(true, "b")], "c")), None);
        assert_eq!(set.insert("R3", make_clause([(true, "a")], "b")), Some("R1".into()));
        // Polarity makes a difference
        assert_eq!(set.insert("R4", make_clause([(false, "a")], "b")), None);

        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["R3", "R2", "R4"]);
        assert_eq!(set.name_of(&make_clause([(true, "a")], "b")), Some("R3"));
        assert_eq!(set.to_string(), "R3: a, b\nR2: b, c\nR4: NOT a, b\n");
    }
}
