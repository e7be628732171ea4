use std::fmt::Display;

use itertools::Itertools;
use tracing::trace;

use crate::{math::Map, prelude::*};

use super::{LabelOf, WeightOf};

#[derive(Clone, Debug, Default)]
struct StoredState {
    live: bool,
    succ: Vec<TransitionIndex>,
    pred: Vec<TransitionIndex>,
}

#[derive(Clone, Debug)]
struct StoredTransition<Lb, Wt> {
    src: StateIndex,
    dst: StateIndex,
    label: Lb,
    weight: Wt,
}

/// The reference implementation of [`Automaton`] and [`AutomatonMut`].
///
/// States and transitions are kept in two vectors and addressed by their position in it. Every
/// state stores the lists of its outgoing and incoming transitions, so that all neighborhood
/// queries are linear in the degree of the state. Slots of deleted states and transitions are
/// recycled by later insertions. State `0` is `pre` and state `1` is `post`.
///
/// Cloning produces an independent copy that shares the [`Context`].
#[derive(Clone, Debug)]
pub struct MutableAutomaton<L: LabelSet, W: WeightSet> {
    ctx: Context<L, W>,
    states: Vec<StoredState>,
    transitions: Vec<Option<StoredTransition<L::Label, W::Weight>>>,
    states_free: Vec<StateIndex>,
    transitions_free: Vec<TransitionIndex>,
}

const PRE: StateIndex = 0;
const POST: StateIndex = 1;

impl<L: LabelSet, W: WeightSet> MutableAutomaton<L, W> {
    /// Creates an automaton without states (apart from `pre` and `post`) over `ctx`.
    pub fn new(ctx: Context<L, W>) -> Self {
        let sentinel = StoredState {
            live: true,
            ..Default::default()
        };
        Self {
            ctx,
            states: vec![sentinel.clone(), sentinel],
            transitions: vec![],
            states_free: vec![],
            transitions_free: vec![],
        }
    }

    /// Creates an automaton over `ctx` with `n` states, which are indexed `2..n + 2`.
    pub fn with_states(ctx: Context<L, W>, n: usize) -> Self {
        let mut aut = Self::new(ctx);
        for _ in 0..n {
            aut.new_state();
        }
        aut
    }

    /// Copies any automaton over the same context into a fresh [`MutableAutomaton`]. States are
    /// renumbered in ascending order, `pre` and `post` of `aut` become `pre` and `post` of the
    /// copy, parallel transitions stay parallel. Returns the copy and the map from states of
    /// `aut` to states of the copy.
    pub fn copy_of<A>(aut: &A) -> (Self, Map<StateIndex, StateIndex>)
    where
        A: Automaton<Labels = L, Weights = W>,
    {
        let mut copy = Self::new(aut.context().clone());
        let mut map = Map::default();
        map.insert(aut.pre(), PRE);
        map.insert(aut.post(), POST);
        for s in aut.states() {
            map.insert(s, copy.new_state());
        }
        for t in aut.all_transitions() {
            copy.new_transition(
                map[&aut.src_of(t)],
                map[&aut.dst_of(t)],
                aut.label_of(t),
                aut.weight_of(t),
            );
        }
        (copy, map)
    }

    fn stored(&self, t: TransitionIndex) -> &StoredTransition<L::Label, W::Weight> {
        match self.transitions.get(t) {
            Some(Some(stored)) => stored,
            _ => panic!("transition {t} does not exist"),
        }
    }

    fn stored_state(&self, state: StateIndex) -> &StoredState {
        match self.states.get(state) {
            Some(stored) if stored.live => stored,
            _ => panic!("state {state} does not exist"),
        }
    }
}

impl<L: LabelSet, W: WeightSet> Automaton for MutableAutomaton<L, W> {
    type Labels = L;
    type Weights = W;

    fn context(&self) -> &Context<L, W> {
        &self.ctx
    }

    fn pre(&self) -> StateIndex {
        PRE
    }

    fn post(&self) -> StateIndex {
        POST
    }

    fn all_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.live.then_some(i))
    }

    fn has_state(&self, state: StateIndex) -> bool {
        self.states.get(state).map_or(false, |s| s.live)
    }

    fn all_transitions(&self) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.transitions
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|_| i))
    }

    fn all_out(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.stored_state(state).succ.iter().copied()
    }

    fn all_in(&self, state: StateIndex) -> impl Iterator<Item = TransitionIndex> + '_ {
        self.stored_state(state).pred.iter().copied()
    }

    fn src_of(&self, t: TransitionIndex) -> StateIndex {
        self.stored(t).src
    }

    fn dst_of(&self, t: TransitionIndex) -> StateIndex {
        self.stored(t).dst
    }

    fn label_of(&self, t: TransitionIndex) -> LabelOf<Self> {
        self.stored(t).label.clone()
    }

    fn weight_of(&self, t: TransitionIndex) -> WeightOf<Self> {
        self.stored(t).weight.clone()
    }

    fn get_transition(
        &self,
        src: StateIndex,
        dst: StateIndex,
        label: &LabelOf<Self>,
    ) -> Option<TransitionIndex> {
        if !self.has_state(src) || !self.has_state(dst) {
            return None;
        }
        self.stored_state(src).succ.iter().copied().find(|t| {
            let stored = self.stored(*t);
            stored.dst == dst && &stored.label == label
        })
    }
}

impl<L: LabelSet, W: WeightSet> AutomatonMut for MutableAutomaton<L, W> {
    fn new_state(&mut self) -> StateIndex {
        let fresh = StoredState {
            live: true,
            ..Default::default()
        };
        match self.states_free.pop() {
            Some(state) => {
                self.states[state] = fresh;
                state
            }
            None => {
                self.states.push(fresh);
                self.states.len() - 1
            }
        }
    }

    fn del_state(&mut self, state: StateIndex) {
        assert!(
            state != PRE && state != POST,
            "cannot delete the pre or post state"
        );
        let outgoing = self.stored_state(state).succ.clone();
        for t in outgoing {
            self.del_transition(t);
        }
        // loops are gone with the outgoing transitions
        let incoming = self.stored_state(state).pred.clone();
        for t in incoming {
            self.del_transition(t);
        }
        self.states[state] = StoredState::default();
        self.states_free.push(state);
        trace!("deleted state {state}");
    }

    fn new_transition(
        &mut self,
        src: StateIndex,
        dst: StateIndex,
        label: LabelOf<Self>,
        weight: WeightOf<Self>,
    ) -> TransitionIndex {
        assert!(
            self.has_state(src) && self.has_state(dst),
            "transition {src} -> {dst} between states that do not exist"
        );
        debug_assert!(
            !self.ctx.weightset().is_zero(&weight),
            "transition with zero weight"
        );
        let stored = Some(StoredTransition {
            src,
            dst,
            label,
            weight,
        });
        let t = match self.transitions_free.pop() {
            Some(t) => {
                self.transitions[t] = stored;
                t
            }
            None => {
                self.transitions.push(stored);
                self.transitions.len() - 1
            }
        };
        self.states[src].succ.push(t);
        self.states[dst].pred.push(t);
        t
    }

    fn del_transition(&mut self, t: TransitionIndex) {
        let (src, dst) = {
            let stored = self.stored(t);
            (stored.src, stored.dst)
        };
        self.states[src].succ.retain(|u| *u != t);
        self.states[dst].pred.retain(|u| *u != t);
        self.transitions[t] = None;
        self.transitions_free.push(t);
    }

    fn set_weight(&mut self, t: TransitionIndex, weight: WeightOf<Self>) -> WeightOf<Self> {
        if self.ctx.weightset().is_zero(&weight) {
            self.del_transition(t);
        } else {
            match self.transitions.get_mut(t) {
                Some(Some(stored)) => stored.weight = weight.clone(),
                _ => panic!("transition {t} does not exist"),
            }
        }
        weight
    }
}

impl<L: LabelSet, W: WeightSet> Display for MutableAutomaton<L, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show_state = |s: StateIndex| match s {
            PRE | POST => "$".to_string(),
            s => s.show(),
        };

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Source", "Label", "Weight", "Destination"].map(String::from));
        for t in self
            .all_transitions()
            .sorted_by_key(|t| (self.src_of(*t), self.dst_of(*t), self.label_of(*t)))
        {
            builder.push_record([
                show_state(self.src_of(t)),
                self.label_of(t).show(),
                self.weight_of(t).show(),
                show_state(self.dst_of(t)),
            ]);
        }

        write!(
            f,
            "{}\n{}",
            self.ctx.name(),
            builder
                .build()
                .with(tabled::settings::Style::rounded())
        )
    }
}
