use tracing::trace;

use crate::{automaton::LabelOf, math::BitSet, prelude::*};

fn spontaneous_successors<A: Automaton>(
    aut: &A,
    state: StateIndex,
    one: &LabelOf<A>,
) -> Vec<StateIndex> {
    aut.outs_labeled(state, one).map(|t| aut.dst_of(t)).collect()
}

/// Whether the subautomaton made of the spontaneous transitions of `aut` has no cycle. A
/// spontaneous loop is a cycle. Automata whose label set has no spontaneous label are acyclic.
///
/// This is an iterative depth first search, states on the current path are marked open and
/// states whose successors have all been explored are marked closed. Reaching an open state
/// closes a cycle.
pub fn is_eps_acyclic<A: Automaton>(aut: &A) -> bool {
    let Some(one) = aut.labelset().one() else {
        return true;
    };
    let mut open = BitSet::new();
    let mut closed = BitSet::new();

    for root in aut.states() {
        if closed.contains(root) {
            continue;
        }
        open.insert(root);
        let mut stack = vec![(root, spontaneous_successors(aut, root, &one))];

        while let Some((state, successors)) = stack.last_mut() {
            let state = *state;
            match successors.pop() {
                Some(next) if open.contains(next) => {
                    trace!("spontaneous cycle through {state} and {next}");
                    return false;
                }
                Some(next) if !closed.contains(next) => {
                    open.insert(next);
                    stack.push((next, spontaneous_successors(aut, next, &one)));
                }
                Some(_) => {}
                None => {
                    open.remove(state);
                    closed.insert(state);
                    stack.pop();
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn ctx() -> Context<NullableSet, B> {
        Context::new(NullableSet::of_size(1), B)
    }

    #[test]
    fn spontaneous_cycles() {
        let e = Letter::One;
        let a = Letter::Char('a');

        let diamond = AutomatonBuilder::new(ctx())
            .with_transitions([(0, e, true, 1), (0, e, true, 2), (1, e, true, 3), (2, e, true, 3)])
            .build();
        assert!(is_eps_acyclic(&diamond));

        let cycle = AutomatonBuilder::new(ctx())
            .with_transitions([(0, e, true, 1), (1, e, true, 2), (2, e, true, 0)])
            .build();
        assert!(!is_eps_acyclic(&cycle));

        let broken = AutomatonBuilder::new(ctx())
            .with_transitions([(0, e, true, 1), (1, e, true, 2), (2, a, true, 0)])
            .build();
        assert!(is_eps_acyclic(&broken));

        let selfloop = AutomatonBuilder::new(ctx())
            .with_transitions([(0, a, true, 1), (1, e, true, 1)])
            .build();
        assert!(!is_eps_acyclic(&selfloop));
    }

    #[test]
    fn letters_are_always_acyclic() {
        let a = Letter::Char('a');
        let aut = AutomatonBuilder::new(Context::new(LetterSet::of_size(1), B))
            .with_transitions([(0, a, true, 0)])
            .build();
        assert!(is_eps_acyclic(&aut));
    }
}
