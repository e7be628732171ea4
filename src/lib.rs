//! Weighted finite automata over semirings, centered on the removal of spontaneous
//! transitions.
//!
//! An automaton is defined over a [`Context`], which pairs a label set (see [`labelset`]) with a
//! weight set (see [`weightset`]). The label set determines which labels may appear on transitions
//! and whether a spontaneous label (written `\e`) exists at all. The weight set is a semiring that
//! provides `zero`, `one`, addition, multiplication and a partial star operation. Each weight set
//! statically declares its [`StarStatus`], which describes how reliably star is defined and
//! which in turn decides how validity of spontaneous transition removal is established.
//!
//! The reference automaton implementation is [`MutableAutomaton`]. Two sentinel states, `pre` and
//! `post`, always exist: initial weights are carried by transitions leaving `pre` and final weights
//! by transitions entering `post`. Reading is abstracted by the [`Automaton`] trait and editing by
//! [`AutomatonMut`], so that algorithms run unchanged on a [`Transposed`] view, which swaps the
//! roles of sources and destinations while sharing the storage of the wrapped automaton.
//!
//! The main algorithms live in [`algos`]:
//! - [`algos::proper`] removes spontaneous transitions, either in place or on a copy, in either
//!   [`Direction`], with the validity checks mandated by the star status of the weight set.
//! - [`algos::is_eps_acyclic`], [`algos::accessible`] and [`algos::evaluate`] are the structural
//!   and semantic helpers around it.
//!
//! ```
//! use vcsn::prelude::*;
//!
//! let ctx = Context::new(NullableSet::of_size(2), Z);
//! let mut aut = AutomatonBuilder::new(ctx)
//!     .with_transitions([(0, Letter::One, 2, 1), (1, Letter::from('a'), 3, 1)])
//!     .with_initial(0, 1)
//!     .with_final(1, 1)
//!     .build();
//! assert!(!is_proper(&aut));
//! eps_removal_here(&mut aut, Direction::Backward).unwrap();
//! assert!(is_proper(&aut));
//! assert_eq!(evaluate(&aut, &['a']), Ok(6));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use vcsn::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        algos::{
            accessible, accessible_states, eps_removal, eps_removal_here, evaluate, is_accessible,
            is_eps_acyclic, is_proper, is_valid, num_spontaneous_transitions, proper, proper_here,
            Direction, EvaluateError, ParseAlgorithmError, ParseDirectionError, ProperAlgorithm,
            ProperError,
        },
        automaton::{
            transpose, Automaton, AutomatonBuilder, AutomatonMut, MutableAutomaton, StateIndex,
            TransitionIndex, Transposed,
        },
        context::Context,
        labelset::{LabelSet, Letter, LetterSet, NullableSet},
        math,
        weightset::{Rational, StarError, StarStatus, WeightSet, B, F2, Q, R, Z, ZMin},
        Show,
    };

    #[cfg(feature = "random")]
    pub use super::random::{generate_random_automaton, optional_chain, RandomAutomaton};
}

/// Collection aliases used throughout the crate.
pub mod math;

/// Label sets: the admissible labels of an automaton, and whether a spontaneous label exists.
pub mod labelset;
pub use labelset::LabelSet;

/// Weight sets (semirings) and their star status.
pub mod weightset;
pub use weightset::{StarStatus, WeightSet};

/// The context of an automaton, i.e. its label set together with its weight set.
pub mod context;
pub use context::Context;

/// The automaton contract, the reference mutable implementation and the transposed view.
pub mod automaton;
pub use automaton::{Automaton, AutomatonMut, MutableAutomaton, Transposed};

/// Algorithms on automata, most importantly the removal of spontaneous transitions.
pub mod algos;
pub use algos::Direction;

/// Generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, labels, weights and such.
pub trait Show {
    /// Returns a human readable representation of `self`. For a state index this should be
    /// something like `3`, for a spontaneous label `\e` and for a weight its usual notation.
    /// This is mainly used for debugging and for rendering transition tables.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be `{2, 3, 4}`.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for i64 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for f64 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "1",
            false => "0",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!("\"{}\"", self.iter().map(|x| x.show()).join(""))
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn show_collections() {
        assert_eq!(vec![2usize, 3, 5].show(), "{2, 3, 5}");
        assert_eq!(['a', 'b'][..].show(), "\"ab\"");
        assert_eq!((3usize, true).show(), "(3, 1)");
    }
}
