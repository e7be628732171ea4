use crate::prelude::*;

/// Helper struct for the construction of automata. It collects transitions, initial and final
/// weights, all referring to states by a dense index starting at zero, and creates the
/// automaton in one go.
///
/// Builder state `i` becomes state `i + 2` of the resulting [`MutableAutomaton`], because the
/// indices `0` and `1` are taken by `pre` and `post`. Transitions that share source,
/// destination and label are merged by adding their weights.
///
/// # Example
///
/// A three state cycle on `a` over the integers, in which every state is initial and final:
/// ```
/// use vcsn::prelude::*;
///
/// let a = Letter::Char('a');
/// let aut = AutomatonBuilder::new(Context::new(LetterSet::of_size(1), Z))
///     .with_transitions([(0, a, 1, 1), (1, a, 1, 2), (2, a, 1, 0)])
///     .with_initials([(0, 1), (1, 1), (2, 1)])
///     .with_finals([(0, 1), (1, 1), (2, 1)])
///     .build();
/// assert_eq!(aut.num_states(), 3);
/// assert_eq!(aut.num_transitions(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct AutomatonBuilder<L: LabelSet, W: WeightSet> {
    ctx: Context<L, W>,
    num_states: usize,
    transitions: Vec<(usize, L::Label, W::Weight, usize)>,
    initials: Vec<(usize, W::Weight)>,
    finals: Vec<(usize, W::Weight)>,
}

impl<L: LabelSet, W: WeightSet> AutomatonBuilder<L, W> {
    /// Creates an empty builder over `ctx`.
    pub fn new(ctx: Context<L, W>) -> Self {
        Self {
            ctx,
            num_states: 0,
            transitions: vec![],
            initials: vec![],
            finals: vec![],
        }
    }

    /// Ensures that the automaton has at least `n` states, even if some of them have no
    /// transitions.
    pub fn with_states(mut self, n: usize) -> Self {
        self.num_states = self.num_states.max(n);
        self
    }

    fn touch(&mut self, state: usize) {
        self.num_states = self.num_states.max(state + 1);
    }

    /// Adds a transition given as `(source, label, weight, destination)`.
    pub fn with_transition(
        mut self,
        (src, label, weight, dst): (usize, L::Label, W::Weight, usize),
    ) -> Self {
        self.touch(src);
        self.touch(dst);
        self.transitions.push((src, label, weight, dst));
        self
    }

    /// Adds a list of transitions, each given as `(source, label, weight, destination)`.
    pub fn with_transitions<I>(self, iter: I) -> Self
    where
        I: IntoIterator<Item = (usize, L::Label, W::Weight, usize)>,
    {
        iter.into_iter().fold(self, |acc, t| acc.with_transition(t))
    }

    /// Adds `weight` to the initial weight of `state`.
    pub fn with_initial(mut self, state: usize, weight: W::Weight) -> Self {
        self.touch(state);
        self.initials.push((state, weight));
        self
    }

    /// Adds a list of `(state, weight)` pairs of initial weights.
    pub fn with_initials<I: IntoIterator<Item = (usize, W::Weight)>>(self, iter: I) -> Self {
        iter.into_iter()
            .fold(self, |acc, (q, w)| acc.with_initial(q, w))
    }

    /// Adds `weight` to the final weight of `state`.
    pub fn with_final(mut self, state: usize, weight: W::Weight) -> Self {
        self.touch(state);
        self.finals.push((state, weight));
        self
    }

    /// Adds a list of `(state, weight)` pairs of final weights.
    pub fn with_finals<I: IntoIterator<Item = (usize, W::Weight)>>(self, iter: I) -> Self {
        iter.into_iter().fold(self, |acc, (q, w)| acc.with_final(q, w))
    }

    /// Builds the automaton.
    pub fn build(self) -> MutableAutomaton<L, W> {
        self.build_indexed().0
    }

    /// Builds the automaton and returns it together with the index of every builder state.
    pub fn build_indexed(self) -> (MutableAutomaton<L, W>, Vec<StateIndex>) {
        let mut aut = MutableAutomaton::new(self.ctx);
        let states: Vec<_> = (0..self.num_states).map(|_| aut.new_state()).collect();
        for (src, label, weight, dst) in self.transitions {
            aut.add_transition(states[src], states[dst], label, weight);
        }
        for (q, w) in self.initials {
            aut.add_initial(states[q], w);
        }
        for (q, w) in self.finals {
            aut.add_final(states[q], w);
        }
        (aut, states)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn builder_merges_and_maps_states() {
        let a = Letter::Char('a');
        let (aut, states) = AutomatonBuilder::new(Context::new(NullableSet::of_size(1), Z))
            .with_transitions([(0, a, 2, 1), (0, a, 3, 1), (1, Letter::One, 1, 0)])
            .with_states(4)
            .with_initial(0, 1)
            .with_final(1, 2)
            .with_final(1, 2)
            .build_indexed();
        assert_eq!(states, vec![2, 3, 4, 5]);
        assert_eq!(aut.num_states(), 4);
        assert_eq!(aut.num_transitions(), 2);
        let t = aut.get_transition(2, 3, &a).unwrap();
        assert_eq!(aut.weight_of(t), 5);
        assert_eq!(aut.final_weight(3), 4);
        assert_eq!(aut.outs(5).count(), 0);
    }

    #[test]
    fn cancelling_weights_leave_no_transition() {
        let aut = AutomatonBuilder::new(Context::new(NullableSet::of_size(1), Z))
            .with_transitions([(0, Letter::One, 2, 1), (0, Letter::One, -2, 1)])
            .build();
        assert_eq!(aut.num_states(), 2);
        assert_eq!(aut.num_transitions(), 0);
    }
}
