use std::fmt::Debug;

use thiserror::Error;

use crate::Show;

mod b;
pub use b::B;

mod f2;
pub use f2::F2;

mod z;
pub use z::Z;

mod q;
pub use q::{Rational, Q};

mod r;
pub use r::R;

mod zmin;
pub use zmin::ZMin;

/// Classifies how reliably the star of a weight is defined in a weight set. This is a static
/// property that every [`WeightSet`] declares about itself, it decides how the validity of
/// spontaneous transition removal is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarStatus {
    /// Every weight has a star, e.g. the booleans. Removal never fails.
    Starable,
    /// Star may or may not be defined, the only way to know is to try, e.g. `zmin`.
    Tops,
    /// Only zero has a star, e.g. the integers. An automaton is valid iff its spontaneous
    /// transitions are acyclic.
    NonStarable,
    /// Validity is decided on the automaton in which every weight is replaced by its absolute
    /// value, e.g. the rationals and the reals.
    Absval,
}

/// Raised by [`WeightSet::star`] on a weight that has no star.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{weightset}: star: invalid value: {value}")]
pub struct StarError {
    /// Name of the weight set.
    pub weightset: &'static str,
    /// Rendering of the offending weight.
    pub value: String,
}

impl StarError {
    /// Creates an error for `value` which is not starable in the weight set called `weightset`.
    pub fn new<V: Show>(weightset: &'static str, value: &V) -> Self {
        Self {
            weightset,
            value: value.show(),
        }
    }
}

/// A weight set is a semiring, whose elements are used as weights of transitions. Addition
/// accumulates the weights of alternative paths, multiplication those of consecutive
/// transitions. The star of a weight `w` is the (possibly undefined) infinite sum
/// `1 + w + w·w + ...`.
pub trait WeightSet: Clone + Debug + PartialEq {
    /// The type of weights.
    type Weight: Clone + PartialEq + Debug + Show;

    /// Describes for which weights [`WeightSet::star`] is defined.
    const STAR_STATUS: StarStatus;

    /// The neutral element of addition, absorbing for multiplication.
    fn zero(&self) -> Self::Weight;

    /// The neutral element of multiplication.
    fn one(&self) -> Self::Weight;

    /// Semiring addition.
    fn add(&self, l: &Self::Weight, r: &Self::Weight) -> Self::Weight;

    /// Semiring multiplication, not necessarily commutative.
    fn mul(&self, l: &Self::Weight, r: &Self::Weight) -> Self::Weight;

    /// The star of `w`, or a [`StarError`] if it is not defined.
    fn star(&self, w: &Self::Weight) -> Result<Self::Weight, StarError>;

    /// Checks whether `w` is zero. Transitions with a zero weight are considered absent.
    fn is_zero(&self, w: &Self::Weight) -> bool {
        self.equal(w, &self.zero())
    }

    /// Checks whether `w` is one.
    fn is_one(&self, w: &Self::Weight) -> bool {
        self.equal(w, &self.one())
    }

    /// Whether `l` and `r` denote the same weight.
    fn equal(&self, l: &Self::Weight, r: &Self::Weight) -> bool {
        l == r
    }

    /// The absolute value of `w`. Only meaningful for weight sets whose status is
    /// [`StarStatus::Absval`].
    fn abs(&self, w: &Self::Weight) -> Self::Weight {
        w.clone()
    }

    /// The weight to use when reading a transition backwards. Commutative weight sets leave
    /// weights unchanged.
    fn transpose(&self, w: &Self::Weight) -> Self::Weight {
        w.clone()
    }

    /// Sums all given weights, the empty sum is zero.
    fn sum<'a, I>(&self, weights: I) -> Self::Weight
    where
        I: IntoIterator<Item = &'a Self::Weight>,
        Self::Weight: 'a,
    {
        weights
            .into_iter()
            .fold(self.zero(), |acc, w| self.add(&acc, w))
    }

    /// A short name of the weight set, e.g. `z`.
    fn name(&self) -> &'static str;
}
