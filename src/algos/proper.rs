//! Removal of spontaneous transitions.
//!
//! Whether the removal is possible at all depends on the weight set: every spontaneous cycle
//! has to be traversed arbitrarily often, so the star of its weight must be defined. How this is
//! established is decided by the [`StarStatus`] of the weight set, see [`is_valid`].

use std::{fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::prelude::*;

mod profile;
pub use profile::{EpsilonProfile, ProfileQueue};

mod inplace;
pub use inplace::EpsilonRemover;

mod distance;
pub use distance::distance_remover;

/// Error raised when spontaneous transitions cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProperError {
    /// Some spontaneous cycle has a weight whose star is not defined.
    #[error("proper: invalid automaton")]
    InvalidAutomaton,
    /// The requested algorithm is not available.
    #[error("proper: unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// The direction in which spontaneous transitions are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// The weights of spontaneous paths are pushed onto the transitions that follow them,
    /// states lose their incoming spontaneous transitions one after another.
    #[default]
    Backward,
    /// The weights of spontaneous paths are pulled onto the transitions that precede them.
    /// Runs the backward removal on the transposed automaton.
    Forward,
}

/// Raised when parsing an unknown [`Direction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction: {0}, expected backward or forward")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backward" => Ok(Direction::Backward),
            "forward" => Ok(Direction::Forward),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Backward => write!(f, "backward"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

/// The algorithm used by [`proper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProperAlgorithm {
    /// Same as [`ProperAlgorithm::Inplace`].
    #[default]
    Auto,
    /// Same as [`ProperAlgorithm::Inplace`].
    Default,
    /// State by state elimination, see [`EpsilonRemover`].
    Inplace,
    /// Closure of the spontaneous distances between all states, see [`distance_remover`].
    Distance,
    /// Removal on a separate copy of the spontaneous subautomaton. Not provided by this crate.
    Separate,
}

/// Raised when parsing an unknown [`ProperAlgorithm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid algorithm: {0}, expected auto, default, inplace, distance or separate")]
pub struct ParseAlgorithmError(String);

impl FromStr for ProperAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "auto" => ProperAlgorithm::Auto,
            "default" => ProperAlgorithm::Default,
            "inplace" => ProperAlgorithm::Inplace,
            "distance" => ProperAlgorithm::Distance,
            "separate" => ProperAlgorithm::Separate,
            _ => return Err(ParseAlgorithmError(s.to_string())),
        })
    }
}

impl Display for ProperAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProperAlgorithm::Auto => "auto",
            ProperAlgorithm::Default => "default",
            ProperAlgorithm::Inplace => "inplace",
            ProperAlgorithm::Distance => "distance",
            ProperAlgorithm::Separate => "separate",
        };
        write!(f, "{name}")
    }
}

impl ProperAlgorithm {
    fn resolve(self) -> Result<Self, ProperError> {
        match self {
            ProperAlgorithm::Auto | ProperAlgorithm::Default | ProperAlgorithm::Inplace => {
                Ok(ProperAlgorithm::Inplace)
            }
            ProperAlgorithm::Distance => Ok(ProperAlgorithm::Distance),
            ProperAlgorithm::Separate => Err(ProperError::UnsupportedAlgorithm(self.to_string())),
        }
    }
}

/// Whether no transition of `aut` carries the spontaneous label. Always true if the label set
/// has no spontaneous label.
pub fn is_proper<A: Automaton>(aut: &A) -> bool {
    !<A::Labels as LabelSet>::HAS_ONE || aut.transitions().all(|t| !aut.is_spontaneous(t))
}

/// Counts the transitions of `aut` that carry the spontaneous label.
pub fn num_spontaneous_transitions<A: Automaton>(aut: &A) -> usize {
    aut.transitions().filter(|t| aut.is_spontaneous(*t)).count()
}

/// Decides whether the spontaneous transitions of `aut` can be removed, i.e. whether all the
/// stars the removal needs are defined. Never fails.
///
/// Proper and spontaneous-acyclic automata are always valid. Otherwise, depending on
/// the [`StarStatus`] of the weight set:
/// - [`StarStatus::Starable`]: valid.
/// - [`StarStatus::Tops`]: the removal is tried on a copy.
/// - [`StarStatus::NonStarable`]: invalid. This is not exact for weight sets with zero divisors,
///   where a spontaneous cycle may have a zero weight.
/// - [`StarStatus::Absval`]: the removal is tried on a copy in which every weight is replaced
///   by its absolute value.
pub fn is_valid<A: Automaton>(aut: &A) -> bool {
    if <A::Weights as WeightSet>::STAR_STATUS == StarStatus::Starable {
        return true;
    }
    if is_proper(aut) || is_eps_acyclic(aut) {
        return true;
    }
    match <A::Weights as WeightSet>::STAR_STATUS {
        StarStatus::Starable => true,
        StarStatus::NonStarable => false,
        StarStatus::Tops => trial_removal(aut, false),
        StarStatus::Absval => trial_removal(aut, true),
    }
}

fn trial_removal<A: Automaton>(aut: &A, absolute: bool) -> bool {
    let (mut copy, _) = MutableAutomaton::copy_of(aut);
    if absolute {
        let ws = copy.weightset().clone();
        let transitions: Vec<_> = copy.all_transitions().collect();
        for t in transitions {
            let w = ws.abs(&copy.weight_of(t));
            copy.set_weight(t, w);
        }
    }
    match EpsilonRemover::new(&mut copy, false).in_situ_remover() {
        Ok(()) => true,
        Err(e) => {
            debug!("trial removal failed: {e}");
            false
        }
    }
}

/// Removes the spontaneous transitions of `aut` in place, without pruning.
pub fn eps_removal_here<A: AutomatonMut>(
    aut: &mut A,
    direction: Direction,
) -> Result<(), ProperError> {
    proper_here(aut, direction, false, ProperAlgorithm::Inplace)
}

/// Returns a copy of `aut` without spontaneous transitions. No state is pruned.
pub fn eps_removal<A: AutomatonMut + Clone>(
    aut: &A,
    direction: Direction,
) -> Result<A, ProperError> {
    let mut res = aut.clone();
    eps_removal_here(&mut res, direction)?;
    Ok(res)
}

/// Removes the spontaneous transitions of `aut` in place with the given algorithm. If `prune`
/// is set, states that lose all their incoming transitions in the process are deleted.
///
/// Fails with [`ProperError::InvalidAutomaton`] if `aut` is not valid (see [`is_valid`]).
/// For weight sets with [`StarStatus::Tops`] validity is only discovered during the removal,
/// in which case `aut` is left partially transformed.
pub fn proper_here<A: AutomatonMut>(
    aut: &mut A,
    direction: Direction,
    prune: bool,
    algo: ProperAlgorithm,
) -> Result<(), ProperError> {
    let algo = algo.resolve()?;
    if is_proper(aut) {
        return Ok(());
    }
    match <A::Weights as WeightSet>::STAR_STATUS {
        StarStatus::Starable | StarStatus::Tops => {}
        StarStatus::NonStarable | StarStatus::Absval => {
            if !is_valid(aut) {
                return Err(ProperError::InvalidAutomaton);
            }
        }
    }
    debug!("removing spontaneous transitions {direction} with {algo}, prune: {prune}");
    let res = match direction {
        Direction::Backward => run(aut, prune, algo),
        Direction::Forward => run(&mut transpose(aut), prune, algo),
    };
    res.map_err(|e| {
        debug!("removal failed: {e}");
        ProperError::InvalidAutomaton
    })
}

fn run<A: AutomatonMut>(
    aut: &mut A,
    prune: bool,
    algo: ProperAlgorithm,
) -> Result<(), StarError> {
    match algo {
        ProperAlgorithm::Distance => distance_remover(aut, prune),
        _ => EpsilonRemover::new(aut, prune).in_situ_remover(),
    }
}

/// Returns a copy of `aut` without spontaneous transitions, see [`proper_here`].
pub fn proper<A: AutomatonMut + Clone>(
    aut: &A,
    direction: Direction,
    prune: bool,
    algo: ProperAlgorithm,
) -> Result<A, ProperError> {
    let mut res = aut.clone();
    proper_here(&mut res, direction, prune, algo)?;
    Ok(res)
}
