use std::collections::VecDeque;

use crate::{math::Set, prelude::*};

/// Computes the states that can be reached from an initial state, by a breadth first search
/// from `pre`. Neither `pre` nor `post` is part of the result.
pub fn accessible_states<A: Automaton>(aut: &A) -> Set<StateIndex> {
    let (pre, post) = (aut.pre(), aut.post());
    let mut seen = Set::from_iter([pre]);
    let mut queue = VecDeque::from([pre]);
    while let Some(q) = queue.pop_front() {
        for t in aut.all_out(q) {
            let p = aut.dst_of(t);
            if p != post && seen.insert(p) {
                queue.push_back(p);
            }
        }
    }
    seen.remove(&pre);
    seen
}

/// Whether every state of `aut` is accessible.
pub fn is_accessible<A: Automaton>(aut: &A) -> bool {
    let reached = accessible_states(aut);
    aut.states().all(|s| reached.contains(&s))
}

/// Returns a copy of `aut` in which all states that are not accessible have been deleted. The
/// remaining states keep their index.
pub fn accessible<A: AutomatonMut + Clone>(aut: &A) -> A {
    let reached = accessible_states(aut);
    let mut res = aut.clone();
    let useless: Vec<_> = res.states().filter(|s| !reached.contains(s)).collect();
    for s in useless {
        res.del_state(s);
    }
    res
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn unreachable_states_are_dropped() {
        let a = Letter::Char('a');
        let aut = AutomatonBuilder::new(Context::new(LetterSet::of_size(1), B))
            .with_transitions([(0, a, true, 1), (2, a, true, 1), (3, a, true, 3)])
            .with_initial(0, true)
            .with_final(1, true)
            .build();
        assert_eq!(
            accessible_states(&aut),
            math::Set::from_iter([2, 3])
        );
        assert!(!is_accessible(&aut));

        let res = accessible(&aut);
        assert!(is_accessible(&res));
        assert_eq!(res.states().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(res.num_transitions(), 1);
        assert!(res.is_final(3));
    }
}
