use crate::prelude::*;

use super::{LabelOf, WeightOf};

/// A view of an automaton in which every transition is reversed.
///
/// `pre` and `post` are exchanged, sources become destinations, incoming transitions become
/// outgoing ones, and labels and weights are transposed on the fly. There is no copy: reading
/// the view reads the wrapped automaton and editing the view edits it. Transposing twice yields
/// the original automaton.
#[derive(Clone, Debug)]
pub struct Transposed<A>(A);

/// Wraps `aut` into a [`Transposed`] view. Pass `&mut aut` to obtain an editable view of an
/// automaton that is still owned elsewhere.
pub fn transpose<A: Automaton>(aut: A) -> Transposed<A> {
    Transposed(aut)
}

impl<A> Transposed<A> {
    /// The wrapped automaton.
    pub fn original_automaton(&self) -> &A {
        &self.0
    }

    /// Unwraps the view.
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A: Automaton> Automaton for Transposed<A> {
    type Labels = A::Labels;
    type Weights = A::Weights;

    fn context(&self) -> &Context<Self::Labels, Self::Weights> {
        self.0.context()
    }

    fn pre(&self) -> StateIndex {
        self.0.post()
    }

    fn post(&self) -> StateIndex {
        self.0.pre()
    }

    fn all_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.0.all_states()
    }

    fn has_state(&self, state: StateIndex) -> bool {
        self.0.has_state(state)
    }

    fn all_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.0.all_transitions()
    }

    fn all_out(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.0.all_in(state)
    }

    fn all_in(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.0.all_out(state)
    }

    fn src_of(&self, t: TransitionIndex) -> StateIndex {
        self.0.dst_of(t)
    }

    fn dst_of(&self, t: TransitionIndex) -> StateIndex {
        self.0.src_of(t)
    }

    fn label_of(&self, t: TransitionIndex) -> LabelOf<Self> {
        self.labelset().transpose(&self.0.label_of(t))
    }

    fn weight_of(&self, t: TransitionIndex) -> WeightOf<Self> {
        self.weightset().transpose(&self.0.weight_of(t))
    }

    fn get_transition(
        &self,
        src: StateIndex,
        dst: StateIndex,
        label: &LabelOf<Self>,
    ) -> Option<TransitionIndex> {
        self.0
            .get_transition(dst, src, &self.labelset().transpose(label))
    }
}

impl<A: AutomatonMut> AutomatonMut for Transposed<A> {
    fn new_state(&mut self) -> StateIndex {
        self.0.new_state()
    }

    fn del_state(&mut self, state: StateIndex) {
        self.0.del_state(state)
    }

    fn new_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> TransitionIndex {
        let label = self.labelset().transpose(&label);
        let weight = self.weightset().transpose(&weight);
        self.0.new_transition(dst, src, label, weight)
    }

    fn del_transition(&mut self, t: TransitionIndex) {
        self.0.del_transition(t)
    }

    fn set_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let transposed = self.weightset().transpose(&weight);
        self.0.set_weight(t, transposed);
        weight
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn sample() -> MutableAutomaton<NullableSet, Z> {
        AutomatonBuilder::new(Context::new(NullableSet::of_size(2), Z))
            .with_transitions([
                (0, Letter::Char('a'), 2, 1),
                (1, Letter::One, 3, 2),
            ])
            .with_initial(0, 5)
            .with_final(2, 7)
            .build()
    }

    // states 2 -a|2-> 3 -\e|3-> 4, initial 2 with 5, final 4 with 7
    #[test]
    fn transposition_swaps_roles() {
        let aut = sample();
        let tr = transpose(&aut);
        assert_eq!(tr.pre(), aut.post());
        assert_eq!(tr.post(), aut.pre());
        assert!(tr.is_initial(4));
        assert!(tr.is_final(2));
        assert_eq!(tr.initial_weight(4), 7);
        assert_eq!(tr.final_weight(2), 5);
        assert!(tr.has_transition(3, 2, &Letter::Char('a')));
        assert!(!tr.has_transition(2, 3, &Letter::Char('a')));
        assert!(tr.has_transition(4, 3, &Letter::One));
        assert_eq!(tr.outs(4).count(), 1);
        assert_eq!(tr.ins(4).count(), 0);
        assert_eq!(tr.num_transitions(), aut.num_transitions());
    }

    #[test]
    fn edits_reach_the_original() {
        let mut aut = sample();
        {
            let mut tr = transpose(&mut aut);
            tr.add_transition(4, 2, Letter::Char('b'), 3);
            tr.set_final(2, 1);
            let t = tr.get_transition(4, 3, &Letter::One).unwrap();
            tr.set_weight(t, 0);
        }
        assert!(aut.has_transition(2, 4, &Letter::Char('b')));
        assert_eq!(aut.initial_weight(2), 1);
        assert!(!aut.has_transition(3, 4, &Letter::One));
        assert_eq!(aut.num_transitions(), 2);
    }

    #[test]
    fn double_transposition_is_identity() {
        let aut = sample();
        let tr = transpose(transpose(&aut));
        assert_eq!(tr.pre(), aut.pre());
        assert!(tr.has_transition(2, 3, &Letter::Char('a')));
        assert!(tr.has_transition(3, 4, &Letter::One));
        assert_eq!(tr.final_weight(4), 7);
        assert_eq!(tr.original_automaton().original_automaton().num_states(), 3);
        let inner = tr.into_inner().into_inner();
        assert!(std::ptr::eq(inner, &aut));
    }
}
