use thiserror::Error;

use crate::{automaton::WeightOf, math::Map, prelude::*};

/// Raised by [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluateError {
    /// The automaton has spontaneous transitions.
    #[error("evaluate: the automaton is not proper")]
    NotProper,
    /// The word contains a letter that is not part of the label set.
    #[error("evaluate: invalid letter: {0}")]
    InvalidLetter(char),
}

/// Computes the weight that the proper automaton `aut` assigns to `word`: the sum over all
/// accepting paths labeled `word` of the product of their weights, initial and final weights
/// included. Parallel transitions contribute separately.
pub fn evaluate<A: Automaton>(aut: &A, word: &[char]) -> Result<WeightOf<A>, EvaluateError> {
    if !is_proper(aut) {
        return Err(EvaluateError::NotProper);
    }
    let ws = aut.weightset();

    let mut current: Map<StateIndex, WeightOf<A>> = Map::default();
    for t in aut.initial_transitions() {
        accumulate(ws, &mut current, aut.dst_of(t), aut.weight_of(t));
    }

    for c in word {
        let label = aut
            .labelset()
            .letter(*c)
            .ok_or(EvaluateError::InvalidLetter(*c))?;
        let mut next = Map::default();
        for (q, w) in &current {
            for t in aut.outs_labeled(*q, &label) {
                accumulate(ws, &mut next, aut.dst_of(t), ws.mul(w, &aut.weight_of(t)));
            }
        }
        current = next;
    }

    Ok(current.iter().fold(ws.zero(), |acc, (q, w)| {
        ws.add(&acc, &ws.mul(w, &aut.final_weight(*q)))
    }))
}

fn accumulate<W: WeightSet>(
    ws: &W,
    weights: &mut Map<StateIndex, W::Weight>,
    state: StateIndex,
    weight: W::Weight,
) {
    let entry = weights.entry(state).or_insert_with(|| ws.zero());
    *entry = ws.add(entry, &weight);
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn counting_paths() {
        // two ways to read `ab`, one of them weighted twice
        let (a, b) = (Letter::Char('a'), Letter::Char('b'));
        let mut aut = AutomatonBuilder::new(Context::new(LetterSet::of_size(2), Z))
            .with_transitions([(0, a, 1, 1), (0, a, 2, 2), (1, b, 1, 3), (2, b, 1, 3)])
            .with_initial(0, 1)
            .with_final(3, 3)
            .build();
        assert_eq!(evaluate(&aut, &['a', 'b']), Ok(9));
        assert_eq!(evaluate(&aut, &['a']), Ok(0));
        assert_eq!(evaluate(&aut, &[]), Ok(0));
        assert_eq!(evaluate(&aut, &['c']), Err(EvaluateError::InvalidLetter('c')));

        aut.new_transition(2, 3, a, 4);
        assert_eq!(evaluate(&aut, &['a', 'b']), Ok(21));
    }

    #[test]
    fn parallel_initial_and_final_transitions_are_summed() {
        let (mut aut, s) = AutomatonBuilder::new(Context::new(LetterSet::of_size(1), Z))
            .with_states(1)
            .build_indexed();
        let (pre, post) = (aut.pre(), aut.post());
        let special = aut.labelset().special();
        aut.new_transition(pre, s[0], special, 1);
        aut.new_transition(pre, s[0], special, 1);
        aut.new_transition(s[0], post, special, 2);
        aut.new_transition(s[0], post, special, 3);
        assert_eq!(aut.initial_weight(s[0]), 2);
        assert_eq!(aut.final_weight(s[0]), 5);
        assert_eq!(evaluate(&aut, &[]), Ok(10));
    }

    #[test]
    fn refuses_spontaneous_transitions() {
        let aut = AutomatonBuilder::new(Context::new(NullableSet::of_size(1), B))
            .with_transitions([(0, Letter::One, true, 1)])
            .build();
        assert_eq!(evaluate(&aut, &[]), Err(EvaluateError::NotProper));
        assert_eq!(
            EvaluateError::NotProper.to_string(),
            "evaluate: the automaton is not proper"
        );
    }
}
