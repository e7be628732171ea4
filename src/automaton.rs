use crate::{Context, LabelSet, WeightSet};

mod mutable;
pub use mutable::MutableAutomaton;

mod transpose;
pub use transpose::{transpose, Transposed};

mod builder;
pub use builder::AutomatonBuilder;

/// Index of a state. The sentinel states `pre` and `post` always exist.
pub type StateIndex = usize;
/// Index of a transition.
pub type TransitionIndex = usize;

/// Type alias for the labels of an automaton.
pub type LabelOf<A> = <<A as Automaton>::Labels as LabelSet>::Label;
/// Type alias for the weights of an automaton.
pub type WeightOf<A> = <<A as Automaton>::Weights as WeightSet>::Weight;

/// Read access to a weighted automaton.
///
/// An automaton is a directed multigraph whose transitions carry a label and a weight. Two
/// sentinel states exist in every automaton: [`Automaton::pre`], a virtual super-source whose
/// outgoing transitions carry the initial weights, and [`Automaton::post`], a virtual super-sink
/// whose incoming transitions carry the final weights. Both kinds of transitions are labeled with
/// the special label of the label set.
///
/// Only a handful of methods have to be implemented, everything else (filtering by label,
/// initial and final weights, counting) is derived from them. This allows algorithms to run on
/// views such as [`Transposed`] without duplication.
pub trait Automaton {
    /// The label set of the context.
    type Labels: LabelSet;
    /// The weight set of the context.
    type Weights: WeightSet;

    /// The context this automaton is defined over.
    fn context(&self) -> &Context<Self::Labels, Self::Weights>;

    /// The virtual super-source.
    fn pre(&self) -> StateIndex;

    /// The virtual super-sink.
    fn post(&self) -> StateIndex;

    /// All states, including `pre` and `post`, in ascending order.
    fn all_states(&self) -> impl Iterator<Item = StateIndex> + '_;

    /// Whether `state` is a live state of the automaton.
    fn has_state(&self, state: StateIndex) -> bool;

    /// All transitions, including the initial and final ones.
    fn all_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_;

    /// All transitions leaving `state`, including final transitions.
    fn all_out(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_;

    /// All transitions entering `state`, including initial transitions.
    fn all_in(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_;

    /// Source of the transition `t`.
    fn src_of(&self, t: TransitionIndex) -> StateIndex;

    /// Destination of the transition `t`.
    fn dst_of(&self, t: TransitionIndex) -> StateIndex;

    /// Label of the transition `t`.
    fn label_of(&self, t: TransitionIndex) -> LabelOf<Self>;

    /// Weight of the transition `t`.
    fn weight_of(&self, t: TransitionIndex) -> WeightOf<Self>;

    /// Finds the transition from `src` to `dst` labeled `label`, if it exists. If there are
    /// parallel transitions, the first one is returned.
    fn get_transition(
        &self,
        src: StateIndex,
        dst: StateIndex,
        label: &LabelOf<Self>,
    ) -> Option<TransitionIndex>;

    /// The label set of the context.
    fn labelset(&self) -> &Self::Labels {
        self.context().labelset()
    }

    /// The weight set of the context.
    fn weightset(&self) -> &Self::Weights {
        self.context().weightset()
    }

    /// All states except `pre` and `post`.
    fn states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        let (pre, post) = (self.pre(), self.post());
        self.all_states().filter(move |s| *s != pre && *s != post)
    }

    /// All transitions except the initial and final ones.
    fn transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
        let (pre, post) = (self.pre(), self.post());
        self.all_transitions()
            .filter(move |t| self.src_of(*t) != pre && self.dst_of(*t) != post)
    }

    /// Transitions leaving `state`, excluding the final transition.
    fn outs(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        let post = self.post();
        self.all_out(state).filter(move |t| self.dst_of(*t) != post)
    }

    /// Transitions entering `state`, excluding the initial transition.
    fn ins(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        let pre = self.pre();
        self.all_in(state).filter(move |t| self.src_of(*t) != pre)
    }

    /// Transitions leaving `state` that are labeled `label`.
    fn outs_labeled<'a>(
        &'a self,
        state: StateIndex,
        label: &'a LabelOf<Self>,
    ) -> impl Iterator<Item = TransitionIndex> + 'a {
        self.all_out(state)
            .filter(move |t| &self.label_of(*t) == label)
    }

    /// Transitions entering `state` that are labeled `label`.
    fn ins_labeled<'a>(
        &'a self,
        state: StateIndex,
        label: &'a LabelOf<Self>,
    ) -> impl Iterator<Item = TransitionIndex> + 'a {
        self.all_in(state).filter(move |t| &self.label_of(*t) == label)
    }

    /// Whether a transition from `src` to `dst` labeled `label` exists.
    fn has_transition(&self, src: StateIndex, dst: StateIndex, label: &LabelOf<Self>) -> bool {
        self.get_transition(src, dst, label).is_some()
    }

    /// Whether `t` is labeled with the spontaneous label.
    fn is_spontaneous(&self, t: TransitionIndex) -> bool {
        self.labelset().is_one(&self.label_of(t))
    }

    /// The initial weight of `state`, zero if it is not initial. Parallel initial transitions
    /// are summed.
    fn initial_weight(&self, state: StateIndex) -> WeightOf<Self> {
        let ws = self.weightset();
        let pre = self.pre();
        self.all_in(state)
            .filter(|t| self.src_of(*t) == pre)
            .fold(ws.zero(), |acc, t| ws.add(&acc, &self.weight_of(t)))
    }

    /// The final weight of `state`, zero if it is not final. Parallel final transitions are
    /// summed.
    fn final_weight(&self, state: StateIndex) -> WeightOf<Self> {
        let ws = self.weightset();
        let post = self.post();
        self.all_out(state)
            .filter(|t| self.dst_of(*t) == post)
            .fold(ws.zero(), |acc, t| ws.add(&acc, &self.weight_of(t)))
    }

    /// Whether `state` has a nonzero initial weight.
    fn is_initial(&self, state: StateIndex) -> bool {
        let special = self.labelset().special();
        self.has_transition(self.pre(), state, &special)
    }

    /// Whether `state` has a nonzero final weight.
    fn is_final(&self, state: StateIndex) -> bool {
        let special = self.labelset().special();
        self.has_transition(state, self.post(), &special)
    }

    /// The transitions carrying initial weights.
    fn initial_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.all_out(self.pre())
    }

    /// The transitions carrying final weights.
    fn final_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.all_in(self.post())
    }

    /// Number of states, excluding `pre` and `post`.
    fn num_states(&self) -> usize {
        self.states().count()
    }

    /// Number of transitions, excluding initial and final transitions.
    fn num_transitions(&self) -> usize {
        self.transitions().count()
    }

    /// Number of initial states.
    fn num_initials(&self) -> usize {
        self.initial_transitions().count()
    }

    /// Number of final states.
    fn num_finals(&self) -> usize {
        self.final_transitions().count()
    }
}

/// Edit access to a weighted automaton.
///
/// A transition with a zero weight is considered absent, the editing primitives never leave
/// one behind: setting a zero weight deletes the transition. Invalid arguments (deleting a
/// state or transition that does not exist, deleting `pre` or `post`) are programming errors
/// and cause a panic.
pub trait AutomatonMut: Automaton {
    /// Adds a fresh state and returns its index.
    fn new_state(&mut self) -> StateIndex;

    /// Deletes `state` together with all its incoming and outgoing transitions.
    fn del_state(&mut self, state: StateIndex);

    /// Creates a new transition, even if one with the same source, destination and label
    /// already exists. `weight` must not be zero.
    fn new_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> TransitionIndex;

    /// Deletes the transition `t`.
    fn del_transition(&mut self, t: TransitionIndex);

    /// Sets the weight of `t`, deleting `t` if `weight` is zero. Returns `weight`.
    fn set_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self>;

    /// Sets the weight of the transition from `src` to `dst` labeled `label`, creating it if
    /// needed and deleting it if `weight` is zero. Returns the transition if it exists afterwards.
    fn set_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> Option<TransitionIndex> {
        match self.get_transition(src, dst, &label) {
            Some(t) => {
                let zero = self.weightset().is_zero(&weight);
                self.set_weight(t, weight);
                (!zero).then_some(t)
            }
            None if self.weightset().is_zero(&weight) => None,
            None => Some(self.new_transition(src, dst, label, weight)),
        }
    }

    /// Adds `weight` to the transition from `src` to `dst` labeled `label`, creating it if
    /// needed. The weights are summed explicitly with the semiring addition, so no parallel
    /// transition is introduced. Returns the resulting weight.
    fn add_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> WeightOf<Self> {
        match self.get_transition(src, dst, &label) {
            Some(t) => self.add_weight(t, weight),
            None => {
                if !self.weightset().is_zero(&weight) {
                    self.new_transition(src, dst, label, weight.clone());
                }
                weight
            }
        }
    }

    /// Adds `weight` to the weight of `t`. Returns the resulting weight.
    fn add_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let sum = self.weightset().add(&self.weight_of(t), &weight);
        self.set_weight(t, sum)
    }

    /// Multiplies the weight of `t` by `weight` on the left. Returns the resulting weight.
    fn lmul_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let product = self.weightset().mul(&weight, &self.weight_of(t));
        self.set_weight(t, product)
    }

    /// Multiplies the weight of `t` by `weight` on the right. Returns the resulting weight.
    fn rmul_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let product = self.weightset().mul(&self.weight_of(t), &weight);
        self.set_weight(t, product)
    }

    /// Sets the initial weight of `state`.
    fn set_initial(&mut self, state: StateIndex, weight: WeightOf<Self>) {
        let (pre, special) = (self.pre(), self.labelset().special());
        self.set_transition(pre, state, special, weight);
    }

    /// Adds `weight` to the initial weight of `state`.
    fn add_initial(&mut self, state: StateIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let (pre, special) = (self.pre(), self.labelset().special());
        self.add_transition(pre, state, special, weight)
    }

    /// Sets the final weight of `state`.
    fn set_final(&mut self, state: StateIndex, weight: WeightOf<Self>) {
        let (post, special) = (self.post(), self.labelset().special());
        self.set_transition(state, post, special, weight);
    }

    /// Adds `weight` to the final weight of `state`.
    fn add_final(&mut self, state: StateIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        let (post, special) = (self.post(), self.labelset().special());
        self.add_transition(state, post, special, weight)
    }
}

macro_rules! forward_automaton {
    ($($ty:ty),*) => {
        $(
            impl<A: Automaton + ?Sized> Automaton for $ty {
                type Labels = A::Labels;
                type Weights = A::Weights;

                fn context(&self) -> &Context<Self::Labels, Self::Weights> {
                    (**self).context()
                }
                fn pre(&self) -> StateIndex {
                    (**self).pre()
                }
                fn post(&self) -> StateIndex {
                    (**self).post()
                }
                fn all_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
                    (**self).all_states()
                }
                fn has_state(&self, state: StateIndex) -> bool {
                    (**self).has_state(state)
                }
                fn all_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
                    (**self).all_transitions()
                }
                fn all_out(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
                    (**self).all_out(state)
                }
                fn all_in(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
                    (**self).all_in(state)
                }
                fn src_of(&self, t: TransitionIndex) -> StateIndex {
                    (**self).src_of(t)
                }
                fn dst_of(&self, t: TransitionIndex) -> StateIndex {
                    (**self).dst_of(t)
                }
                fn label_of(&self, t: TransitionIndex) -> LabelOf<Self> {
                    (**self).label_of(t)
                }
                fn weight_of(&self, t: TransitionIndex) -> WeightOf<Self> {
                    (**self).weight_of(t)
                }
                fn get_transition(
                    &self,
                    src: StateIndex,
                    dst: StateIndex,
                    label: &LabelOf<Self>,
                ) -> Option<TransitionIndex> {
                    (**self).get_transition(src, dst, label)
                }
            }
        )*
    };
}

forward_automaton!(&A, &mut A);

impl<A: AutomatonMut + ?Sized> AutomatonMut for &mut A {
    fn new_state(&mut self) -> StateIndex {
        (**self).new_state()
    }

    fn del_state(&mut self, state: StateIndex) {
        (**self).del_state(state)
    }

    fn new_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> TransitionIndex {
        (**self).new_transition(src, dst, label, weight)
    }

    fn del_transition(&mut self, t: TransitionIndex) {
        (**self).del_transition(t)
    }

    fn set_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        (**self).set_weight(t, weight)
    }
}
