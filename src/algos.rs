/// Spontaneous transition removal, its validity checks and the configuration of its entry
/// points.
pub mod proper;
pub use proper::{
    eps_removal, eps_removal_here, is_proper, is_valid, num_spontaneous_transitions, proper,
    proper_here, Direction, ParseAlgorithmError, ParseDirectionError, ProperAlgorithm,
    ProperError,
};

mod is_eps_acyclic;
pub use is_eps_acyclic::is_eps_acyclic;

mod accessible;
pub use accessible::{accessible, accessible_states, is_accessible};

mod evaluate;
pub use evaluate::{evaluate, EvaluateError};
