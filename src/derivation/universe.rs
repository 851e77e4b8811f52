//  UNIVERSE.rs
//    by Lut99
//
//  Created:
//    03 Feb 2025, 16:44:01
//  Last edited:
//    14 Mar 2025, 13:12:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements an abstraction over the set of tuples a [`RuleSet`]
//!   talks about.
//!
//!   In a ground world, the universe is easy: it is simply all the unique
//!   tuples that occur anywhere in a clause. E.g., in the rules
//!   `R1: a, b` and `R2: b, c, d` there are four of them: `a`, `b`, `c` and
//!   `d`, of which `b` and `d` are consequents.
//!
//!   Every tuple gets a stable index, which is what the fixpoint computation
//!   works with instead of the tuples themselves.
//

use indexmap::IndexSet;

use crate::ast::{Clause, RuleSet, Tuple};


/***** LIBRARY *****/
/// A [`Clause`] with its tuples replaced by their index in a [`Universe`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IndexedClause {
    /// The indices of the tuples in the antecedents. Polarity is dropped.
    pub antecedents: Vec<usize>,
    /// The index of the consequent.
    pub consequent:  usize,
}



/// The set of tuples mentioned by a [`RuleSet`].
#[derive(Clone, Debug, Default)]
pub struct Universe {
    /// All tuples mentioned anywhere, in order of discovery.
    tuples:      IndexSet<Tuple>,
    /// The indices (in `tuples`) of tuples that are the consequent of at least one clause.
    consequents: IndexSet<usize>,
}

// Constructors
impl Universe {
    /// Constructor for an empty Universe.
    #[inline]
    pub fn new() -> Self { Self { tuples: IndexSet::new(), consequents: IndexSet::new() } }

    /// Builds the universe of the given rules.
    ///
    /// # Arguments
    /// - `rules`: The [`RuleSet`] to collect the tuples of.
    ///
    /// # Returns
    /// A new Universe with every tuple in `rules` in it exactly once.
    pub fn build(rules: &RuleSet) -> Self {
        let mut universe = Self::new();
        for clause in rules.clauses() {
            universe.extend_with_clause(clause);
        }
        universe
    }
}

// Collection
impl Universe {
    /// Adds the tuples of the given clause to the universe.
    ///
    /// Adding the same clause twice has no effect.
    ///
    /// # Arguments
    /// - `clause`: The [`Clause`] to add the tuples of.
    ///
    /// # Returns
    /// The given clause in terms of tuple indices.
    pub fn extend_with_clause(&mut self, clause: &Clause) -> IndexedClause {
        let antecedents: Vec<usize> = clause.antecedent_tuples().map(|t| self.intern(t)).collect();
        let consequent: usize = self.intern(clause.consequent());
        self.consequents.insert(consequent);
        IndexedClause { antecedents, consequent }
    }

    /// Returns the index of the given tuple, adding it if it wasn't there already.
    #[inline]
    fn intern(&mut self, tuple: &Tuple) -> usize {
        match self.tuples.get_index_of(tuple) {
            Some(idx) => idx,
            None => self.tuples.insert_full(tuple.clone()).0,
        }
    }



    /// Returns the index of the given tuple in this universe, if it is in it.
    #[inline]
    pub fn index_of(&self, tuple: &str) -> Option<usize> { self.tuples.get_index_of(tuple) }

    /// Returns the tuple at the given index, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tuple> { self.tuples.get_index(index) }

    /// Returns whether the given tuple is mentioned anywhere.
    #[inline]
    pub fn contains(&self, tuple: &str) -> bool { self.tuples.contains(tuple) }

    /// Returns whether the given tuple is derived by at least one clause.
    #[inline]
    pub fn is_consequent(&self, tuple: &str) -> bool { self.index_of(tuple).map(|i| self.consequents.contains(&i)).unwrap_or(false) }

    /// Returns all tuples in the universe, in order of discovery.
    #[inline]
    pub fn tuples<'s>(&'s self) -> impl 's + ExactSizeIterator<Item = &'s Tuple> { self.tuples.iter() }

    /// Returns all tuples in the universe that are derived by at least one clause.
    #[inline]
    pub fn consequents<'s>(&'s self) -> impl 's + ExactSizeIterator<Item = &'s Tuple> {
        self.consequents.iter().map(|i| &self.tuples[*i])
    }

    /// Returns the number of tuples in the universe.
    #[inline]
    pub fn len(&self) -> usize { self.tuples.len() }

    /// Returns whether the universe is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.tuples.is_empty() }
}





/***** TESTS *****/
#[cfg(all(test, feature = "macros"))]
mod tests {
    use super::*;
    use crate::ast::rules;
    use crate::tests::make_clause;


    #[test]
    fn test_universe_build() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: c, NOT b, d.
        };
        let universe = Universe::build(&rules);
        assert_eq!(universe.len(), 4);
        assert_eq!(universe.tuples().map(Tuple::as_str).collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(universe.consequents().map(Tuple::as_str).collect::<Vec<_>>(), vec!["b", "d"]);
        assert!(universe.is_consequent("b"));
        assert!(!universe.is_consequent("a"));
        assert!(!universe.is_consequent("e"));
        assert!(!universe.contains("e"));
    }

    #[test]
    fn test_universe_idempotent() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, b.
            R2: b, a.
        };
        let mut universe = Universe::build(&rules);
        let before: Vec<Tuple> = universe.tuples().cloned().collect();
        for clause in rules.clauses() {
            universe.extend_with_clause(clause);
        }
        assert_eq!(universe.tuples().cloned().collect::<Vec<_>>(), before);
        assert_eq!(universe.consequents().count(), 2);
    }

    #[test]
    fn test_universe_extend_with_clause() {
        let rules: RuleSet = rules! {
            #![crate]
            R1: a, NOT b, c.
        };
        let mut universe = Universe::build(&rules);
        // Known tuples keep their index, new ones are appended
        assert_eq!(universe.extend_with_clause(&make_clause([(true, "a"), (false, "b")], "c")), IndexedClause { antecedents: vec![0, 1], consequent: 2 });
        assert_eq!(universe.extend_with_clause(&make_clause([(true, "c")], "x")), IndexedClause { antecedents: vec![2], consequent: 3 });
        assert!(universe.is_consequent("x"));
        assert_eq!(universe.len(), 4);
    }
}
