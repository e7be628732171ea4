use std::{cmp::Ordering, collections::BTreeSet, fmt::Display};

use owo_colors::OwoColorize;
use tracing::trace;

use crate::{automaton::LabelOf, math::Map, prelude::*};

/// Summary of the transitions around a state that still has incoming spontaneous transitions.
/// It is used to estimate how many transitions eliminating the state introduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EpsilonProfile {
    /// The state this profile describes.
    pub state: StateIndex,
    /// Number of incoming spontaneous transitions.
    pub in_sp: usize,
    /// Number of incoming transitions, the initial transition is not counted.
    pub in_total: usize,
    /// Number of outgoing spontaneous transitions.
    pub out_sp: usize,
    /// Number of outgoing transitions, the final transition included.
    pub out_total: usize,
    /// Whether there is a spontaneous loop on the state.
    pub has_loop: bool,
}

impl EpsilonProfile {
    /// Computes the profile of `state` from the current transitions of `aut`, where `one` is
    /// the spontaneous label.
    pub fn of<A: Automaton>(aut: &A, state: StateIndex, one: &LabelOf<A>) -> Self {
        let in_sp = aut.ins_labeled(state, one).count();
        let out_sp = aut.outs_labeled(state, one).count();
        let has_loop = aut
            .outs_labeled(state, one)
            .any(|t| aut.dst_of(t) == state);
        Self {
            state,
            in_sp,
            in_total: aut.ins(state).count(),
            out_sp,
            out_total: aut.all_out(state).count(),
            has_loop,
        }
    }

    /// Upper bound on the number of transitions created when the state is eliminated.
    pub fn cost(&self) -> usize {
        self.in_total * self.out_total
    }
}

impl Ord for EpsilonProfile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost()
            .cmp(&other.cost())
            .then(self.has_loop.cmp(&other.has_loop))
            .then(self.out_sp.cmp(&other.out_sp))
            .then(self.state.cmp(&other.state))
            .then_with(|| {
                (self.in_sp, self.in_total, self.out_total).cmp(&(
                    other.in_sp,
                    other.in_total,
                    other.out_total,
                ))
            })
    }
}

impl PartialOrd for EpsilonProfile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An addressable priority queue of [`EpsilonProfile`]s, at most one per state. The profile
/// that compares smallest is served first: the one whose elimination is expected to create
/// the fewest transitions, preferring states without spontaneous loop.
#[derive(Clone, Debug, Default)]
pub struct ProfileQueue {
    queue: BTreeSet<EpsilonProfile>,
    profiles: Map<StateIndex, EpsilonProfile>,
}

impl ProfileQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `profile`, replacing the previous profile of the same state if there is one.
    pub fn insert(&mut self, profile: EpsilonProfile) {
        if let Some(old) = self.profiles.insert(profile.state, profile) {
            self.queue.remove(&old);
        }
        self.queue.insert(profile);
    }

    /// The current profile of `state`, if it is queued.
    pub fn profile(&self, state: StateIndex) -> Option<&EpsilonProfile> {
        self.profiles.get(&state)
    }

    /// Replaces the profile of an already queued state and moves it to its new position.
    /// Returns false and does nothing if the state is not queued.
    pub fn update(&mut self, profile: EpsilonProfile) -> bool {
        match self.profiles.get_mut(&profile.state) {
            Some(old) => {
                if *old != profile {
                    trace!("updating profile {:?} to {:?}", old, profile);
                    self.queue.remove(old);
                    self.queue.insert(profile);
                    *old = profile;
                }
                true
            }
            None => false,
        }
    }

    /// Removes and returns the profile with the highest priority.
    pub fn pop(&mut self) -> Option<EpsilonProfile> {
        let top = self.queue.pop_first()?;
        self.profiles.remove(&top.state);
        Some(top)
    }

    /// Number of queued states.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no state is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates over the queued profiles in the order in which they would be popped.
    pub fn iter(&self) -> impl Iterator<Item = &EpsilonProfile> + '_ {
        self.queue.iter()
    }
}

impl Display for ProfileQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["State", "In \\e", "In", "Out \\e", "Out", "Loop"].map(String::from));
        for p in self.iter() {
            builder.push_record([
                p.state.show().blue().to_string(),
                p.in_sp.show(),
                p.in_total.show(),
                p.out_sp.show(),
                p.out_total.show(),
                p.has_loop.show(),
            ]);
        }
        write!(
            f,
            "{}",
            builder.build().with(tabled::settings::Style::rounded())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        state: StateIndex,
        in_total: usize,
        out_total: usize,
        has_loop: bool,
    ) -> EpsilonProfile {
        EpsilonProfile {
            state,
            in_sp: 1,
            in_total,
            out_sp: 0,
            out_total,
            has_loop,
        }
    }

    #[test]
    fn cheapest_state_first() {
        let mut queue = ProfileQueue::new();
        queue.insert(profile(2, 3, 3, false));
        queue.insert(profile(3, 1, 2, true));
        queue.insert(profile(4, 2, 1, false));
        queue.insert(profile(5, 1, 1, false));
        assert_eq!(queue.len(), 4);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|p| p.state).collect();
        // 4 and 3 both cost 2, but 3 has a loop
        assert_eq!(order, vec![5, 4, 3, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn updates_reposition() {
        let mut queue = ProfileQueue::new();
        queue.insert(profile(2, 1, 1, false));
        queue.insert(profile(3, 2, 2, false));
        assert!(queue.update(profile(2, 5, 5, false)));
        assert!(!queue.update(profile(7, 0, 0, false)));
        assert_eq!(queue.profile(2).map(|p| p.in_total), Some(5));
        assert_eq!(queue.profile(7), None);

        assert_eq!(queue.pop().map(|p| p.state), Some(3));
        assert_eq!(queue.pop().map(|p| p.state), Some(2));
        assert_eq!(queue.profile(2), None);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn ties_are_broken_by_spontaneous_outputs_then_index() {
        let mut queue = ProfileQueue::new();
        let mut busy = profile(2, 1, 1, false);
        busy.out_sp = 1;
        queue.insert(busy);
        queue.insert(profile(4, 1, 1, false));
        queue.insert(profile(3, 1, 1, false));
        let order: Vec<_> = queue.iter().map(|p| p.state).collect();
        assert_eq!(order, vec![3, 4, 2]);
        assert!(queue.to_string().contains("Loop"));
    }

    #[test]
    fn profiles_count_transitions() {
        let one = Letter::One;
        let aut = AutomatonBuilder::new(Context::new(NullableSet::of_size(1), B))
            .with_transitions([
                (0, one, true, 1),
                (1, one, true, 1),
                (1, Letter::Char('a'), true, 2),
                (2, one, true, 1),
            ])
            .with_initial(1, true)
            .with_final(1, true)
            .build();
        let p = EpsilonProfile::of(&aut, 3, &one);
        assert_eq!(
            p,
            EpsilonProfile {
                state: 3,
                in_sp: 3,
                in_total: 3,
                out_sp: 1,
                out_total: 3,
                has_loop: true,
            }
        );
        assert_eq!(p.cost(), 9);
    }
}
