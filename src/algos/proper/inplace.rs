use owo_colors::OwoColorize;
use tracing::{debug, trace};

use crate::{
    automaton::{LabelOf, WeightOf},
    math::Set,
    prelude::*,
};

use super::profile::{EpsilonProfile, ProfileQueue};

/// Removes the spontaneous transitions of an automaton in place, one state at a time.
///
/// Eliminating a state `s` redirects every path that enters `s` through a spontaneous transition
/// onto the successors of `s`: the weights of the outgoing transitions of `s` are multiplied on
/// the left by the star of the spontaneous loop weight of `s`, and each predecessor `p` reaching
/// `s` with weight `h` receives a copy of each of them, multiplied by `h`. The final weight of
/// `s` is the weight of its transition to `post`, so it is propagated the same way.
///
/// States are eliminated in the order given by a [`ProfileQueue`], cheapest first. The result
/// only depends on this order in its size, never in the weights it assigns to words.
///
/// If the label set has no spontaneous label the remover does nothing.
pub struct EpsilonRemover<'a, A: AutomatonMut> {
    aut: &'a mut A,
    prune: bool,
    one: Option<LabelOf<A>>,
    queue: ProfileQueue,
    added: usize,
    removed: usize,
}

impl<'a, A: AutomatonMut> EpsilonRemover<'a, A> {
    /// Prepares the removal on `aut`. If `prune` is set, states that lose all their incoming
    /// transitions during the removal are deleted.
    pub fn new(aut: &'a mut A, prune: bool) -> Self {
        let one = aut.labelset().one();
        Self {
            aut,
            prune,
            one,
            queue: ProfileQueue::new(),
            added: 0,
            removed: 0,
        }
    }

    /// Number of transitions created so far, merges into existing transitions included.
    pub fn added(&self) -> usize {
        self.added
    }

    /// Number of spontaneous transitions deleted so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Eliminates all spontaneous transitions. Fails if a spontaneous loop weight has no star,
    /// in which case the automaton is left partially transformed.
    pub fn in_situ_remover(&mut self) -> Result<(), StarError> {
        let Some(one) = self.one.clone() else {
            return Ok(());
        };
        if is_proper(&*self.aut) {
            trace!("automaton is already proper");
            return Ok(());
        }

        self.build_queue(&one);
        debug!("eliminating {} states", self.queue.len());
        trace!("{}\n{}", "initial profiles".bold(), self.queue);

        while let Some(profile) = self.queue.pop() {
            let s = profile.state;
            trace!("popped {:?}, {} remaining", profile, self.queue.len());

            let neighbors: Set<StateIndex> = self
                .aut
                .ins(s)
                .map(|t| self.aut.src_of(t))
                .chain(self.aut.outs(s).map(|t| self.aut.dst_of(t)))
                .filter(|q| *q != s)
                .collect();

            self.remove_state(s)?;

            for q in neighbors {
                if self.queue.profile(q).is_some() {
                    let updated = EpsilonProfile::of(&*self.aut, q, &one);
                    self.queue.update(updated);
                }
            }
        }

        debug!(
            "removed {} spontaneous transitions, added {} transitions",
            self.removed, self.added
        );
        Ok(())
    }

    /// Eliminates the incoming spontaneous transitions of `s` only. Other states may gain
    /// spontaneous transitions in the process, namely the predecessors of `s` if `s` has
    /// outgoing spontaneous transitions.
    pub fn remove_state(&mut self, s: StateIndex) -> Result<(), StarError> {
        let Some(one) = self.one.clone() else {
            return Ok(());
        };
        let ws = self.aut.weightset().clone();

        let incoming: Vec<_> = self.aut.ins_labeled(s, &one).collect();
        let mut loop_weight = ws.zero();
        let mut closure: Vec<(StateIndex, WeightOf<A>)> = Vec::with_capacity(incoming.len());
        for t in incoming {
            let src = self.aut.src_of(t);
            let weight = self.aut.weight_of(t);
            if src == s {
                loop_weight = ws.add(&loop_weight, &weight);
            } else {
                closure.push((src, weight));
            }
            self.aut.del_transition(t);
            self.removed += 1;
        }

        let star = ws.star(&loop_weight)?;

        let outgoing: Vec<_> = self.aut.all_out(s).collect();
        for t in outgoing {
            let dst = self.aut.dst_of(t);
            let label = self.aut.label_of(t);
            let blow = self.aut.lmul_weight(t, star.clone());
            for (p, h) in &closure {
                self.aut
                    .add_transition(*p, dst, label.clone(), ws.mul(h, &blow));
                self.added += 1;
            }
        }

        if self.prune && self.aut.all_in(s).next().is_none() {
            trace!("pruning state {s}");
            self.aut.del_state(s);
        }
        Ok(())
    }

    fn build_queue(&mut self, one: &LabelOf<A>) {
        let candidates: Vec<_> = self
            .aut
            .states()
            .filter(|s| self.aut.ins_labeled(*s, one).next().is_some())
            .collect();
        for s in candidates {
            self.queue.insert(EpsilonProfile::of(&*self.aut, s, one));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::EpsilonRemover;

    fn ctx_z() -> Context<NullableSet, Z> {
        Context::new(NullableSet::of_size(2), Z)
    }

    #[test_log::test]
    fn removes_a_single_spontaneous_transition() {
        let mut aut = AutomatonBuilder::new(ctx_z())
            .with_transitions([(0, Letter::One, 2, 1), (1, Letter::Char('a'), 3, 2)])
            .with_initial(0, 1)
            .with_final(2, 1)
            .build();
        let mut remover = EpsilonRemover::new(&mut aut, false);
        remover.in_situ_remover().unwrap();
        assert_eq!(remover.removed(), 1);
        assert_eq!(remover.added(), 1);

        assert!(is_proper(&aut));
        let t = aut.get_transition(2, 4, &Letter::Char('a')).unwrap();
        assert_eq!(aut.weight_of(t), 6);
        // without pruning the state stays around
        assert!(aut.has_state(3));
    }

    #[test_log::test]
    fn loops_are_starred() {
        // 0 -\e|1/2-> 0, 0 -a-> 1
        let half = Rational::new(1, 2);
        let mut aut = AutomatonBuilder::new(Context::new(NullableSet::of_size(1), Q))
            .with_transitions([
                (0, Letter::One, half, 0),
                (0, Letter::Char('a'), Rational::integer(1), 1),
            ])
            .with_initial(0, Rational::integer(1))
            .with_final(0, Rational::integer(3))
            .with_final(1, Rational::integer(1))
            .build();
        EpsilonRemover::new(&mut aut, true).in_situ_remover().unwrap();
        assert!(is_proper(&aut));
        // the initial transition keeps the state alive
        assert!(aut.has_state(2));
        assert_eq!(aut.final_weight(2), Rational::integer(6));
        let t = aut.get_transition(2, 3, &Letter::Char('a')).unwrap();
        assert_eq!(aut.weight_of(t), Rational::integer(2));
    }

    #[test_log::test]
    fn final_weights_flow_to_predecessors() {
        let mut aut = AutomatonBuilder::new(ctx_z())
            .with_transitions([(0, Letter::One, 2, 1), (1, Letter::One, 3, 2)])
            .with_initial(0, 1)
            .with_final(2, 5)
            .build();
        EpsilonRemover::new(&mut aut, true).in_situ_remover().unwrap();
        assert!(is_proper(&aut));
        assert_eq!(aut.final_weight(2), 30);
        assert_eq!(aut.num_states(), 1);
    }

    #[test]
    fn failing_star_is_reported() {
        let mut aut = AutomatonBuilder::new(ctx_z())
            .with_transitions([(0, Letter::One, 2, 0)])
            .with_initial(0, 1)
            .build();
        let err = EpsilonRemover::new(&mut aut, false)
            .in_situ_remover()
            .unwrap_err();
        assert_eq!(err.to_string(), "z: star: invalid value: 2");
    }

    #[test]
    fn single_state_step() {
        // 0 -\e-> 1 -\e-> 2 -a-> 3
        let (mut aut, s) = AutomatonBuilder::new(ctx_z())
            .with_transitions([
                (0, Letter::One, 2, 1),
                (1, Letter::One, 3, 2),
                (2, Letter::Char('a'), 5, 3),
            ])
            .with_initial(0, 1)
            .with_final(3, 1)
            .build_indexed();
        let mut remover = EpsilonRemover::new(&mut aut, true);
        remover.remove_state(s[1]).unwrap();
        // state 1 is unreachable now, its spontaneous transition moved to 0
        assert!(!aut.has_state(s[1]));
        let t = aut.get_transition(s[0], s[2], &Letter::One).unwrap();
        assert_eq!(aut.weight_of(t), 6);
        assert_eq!(num_spontaneous_transitions(&aut), 1);
    }

    #[test]
    fn letters_only_is_a_no_op() {
        let mut aut = AutomatonBuilder::new(Context::new(LetterSet::of_size(1), Z))
            .with_transitions([(0, Letter::Char('a'), 2, 1)])
            .with_initial(0, 1)
            .build();
        let before = aut.num_transitions();
        EpsilonRemover::new(&mut aut, true).in_situ_remover().unwrap();
        assert_eq!(aut.num_transitions(), before);
        assert_eq!(aut.num_states(), 2);
    }
}
