use tracing::debug;

use crate::prelude::*;

/// Parameters for [`generate_random_automaton`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomAutomaton {
    /// Number of states.
    pub states: usize,
    /// Probability that a transition exists between two states for a given letter.
    pub density: f64,
    /// Probability that a spontaneous transition exists between two states.
    pub spontaneous_density: f64,
    /// If set, spontaneous transitions only go from a state to a state with a larger index, so
    /// that they form no cycle.
    pub spontaneous_acyclic: bool,
    /// Number of initial states, picked among the first states.
    pub initials: usize,
    /// Number of final states, picked among the last states.
    pub finals: usize,
}

impl Default for RandomAutomaton {
    fn default() -> Self {
        Self {
            states: 5,
            density: 0.3,
            spontaneous_density: 0.2,
            spontaneous_acyclic: false,
            initials: 1,
            finals: 1,
        }
    }
}

/// Draws a random automaton over the letters of `ctx` with the given parameters. For every
/// ordered pair of states (loops included) and every letter, a transition is added with
/// probability `density`, and a spontaneous one with probability `spontaneous_density`. The
/// weights of transitions as well as initial and final weights are drawn by calling `weight`,
/// a zero weight leaves the transition out.
pub fn generate_random_automaton<W, F>(
    ctx: Context<NullableSet, W>,
    config: &RandomAutomaton,
    mut weight: F,
) -> MutableAutomaton<NullableSet, W>
where
    W: WeightSet,
    F: FnMut() -> W::Weight,
{
    let letters: Vec<_> = ctx.labelset().letters().map(Letter::Char).collect();
    let mut aut = MutableAutomaton::new(ctx);
    let states: Vec<_> = (0..config.states).map(|_| aut.new_state()).collect();

    for (i, p) in states.iter().enumerate() {
        for (j, q) in states.iter().enumerate() {
            for letter in &letters {
                if fastrand::f64() < config.density {
                    aut.add_transition(*p, *q, *letter, weight());
                }
            }
            let allowed = !config.spontaneous_acyclic || i < j;
            if allowed && fastrand::f64() < config.spontaneous_density {
                aut.add_transition(*p, *q, Letter::One, weight());
            }
        }
    }

    for p in states.iter().take(config.initials) {
        aut.add_initial(*p, weight());
    }
    for p in states.iter().rev().take(config.finals) {
        aut.add_final(*p, weight());
    }

    debug!(
        "generated random automaton with {} states, {} transitions, {} of them spontaneous",
        aut.num_states(),
        aut.num_transitions(),
        num_spontaneous_transitions(&aut)
    );
    aut
}

/// Builds the automaton of `a?{n}`: a chain of `n + 1` states in which state `i` has a
/// spontaneous transition and an `a`-transition to state `i + 1`, each weighted one. The first
/// state is initial and the last one final.
pub fn optional_chain<W: WeightSet>(
    ctx: Context<NullableSet, W>,
    n: usize,
) -> MutableAutomaton<NullableSet, W> {
    let one = ctx.weightset().one();
    let a = Letter::Char('a');
    AutomatonBuilder::new(ctx)
        .with_states(n + 1)
        .with_transitions((0..n).flat_map(|i| {
            [(i, Letter::One, one.clone(), i + 1), (i, a, one.clone(), i + 1)]
        }))
        .with_initial(0, one.clone())
        .with_final(n, one.clone())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_words(max_len: usize) -> Vec<Vec<char>> {
        (0..=max_len)
            .flat_map(|len| {
                (0..1usize << len).map(move |bits| {
                    (0..len)
                        .map(|i| if bits >> i & 1 == 1 { 'b' } else { 'a' })
                        .collect()
                })
            })
            .collect()
    }

    #[test_log::test]
    fn random_boolean_automata() {
        fastrand::seed(17);
        let config = RandomAutomaton {
            states: 6,
            initials: 2,
            finals: 2,
            ..Default::default()
        };
        for _ in 0..20 {
            let aut = generate_random_automaton(
                Context::new(NullableSet::of_size(2), B),
                &config,
                || true,
            );
            let inplace =
                proper(&aut, Direction::Backward, true, ProperAlgorithm::Inplace).unwrap();
            let forward = proper(&aut, Direction::Forward, false, ProperAlgorithm::Auto).unwrap();
            let distance =
                proper(&aut, Direction::Backward, false, ProperAlgorithm::Distance).unwrap();
            for word in all_words(4) {
                let expected = evaluate(&inplace, &word);
                assert_eq!(evaluate(&forward, &word), expected, "on {word:?}\n{aut}");
                assert_eq!(evaluate(&distance, &word), expected, "on {word:?}\n{aut}");
            }
        }
    }

    #[test_log::test]
    fn random_integer_automata() {
        fastrand::seed(42);
        let config = RandomAutomaton {
            states: 6,
            spontaneous_acyclic: true,
            spontaneous_density: 0.4,
            initials: 2,
            finals: 3,
            ..Default::default()
        };
        for _ in 0..20 {
            let aut = generate_random_automaton(
                Context::new(NullableSet::of_size(2), Z),
                &config,
                || fastrand::i64(-3..=3),
            );
            assert!(is_eps_acyclic(&aut));
            assert!(is_valid(&aut));
            let back = eps_removal(&aut, Direction::Backward).unwrap();
            let fwd = eps_removal(&aut, Direction::Forward).unwrap();
            let pruned = proper(&aut, Direction::Backward, true, ProperAlgorithm::Auto).unwrap();
            assert!(is_proper(&back) && is_proper(&fwd));
            assert!(pruned.num_states() <= back.num_states());
            for word in all_words(4) {
                let expected = evaluate(&back, &word);
                assert_eq!(evaluate(&fwd, &word), expected, "on {word:?}\n{aut}");
                assert_eq!(evaluate(&pruned, &word), expected, "on {word:?}\n{aut}");
            }
        }
    }

    #[test]
    fn validity_predicts_success_over_rationals() {
        fastrand::seed(3);
        let config = RandomAutomaton {
            states: 4,
            spontaneous_density: 0.5,
            initials: 2,
            finals: 2,
            ..Default::default()
        };
        let (mut valid, mut invalid) = (0, 0);
        for _ in 0..100 {
            let aut = generate_random_automaton(
                Context::new(NullableSet::of_size(2), Q),
                &config,
                || Rational::new(fastrand::i64(-2..=2), fastrand::u64(1..=4)),
            );
            let res = proper(&aut, Direction::Backward, false, ProperAlgorithm::Auto);
            assert_eq!(is_valid(&aut), res.is_ok(), "{aut}");
            match res {
                Ok(res) => {
                    assert!(is_proper(&res));
                    valid += 1;
                }
                Err(e) => {
                    assert_eq!(e, ProperError::InvalidAutomaton);
                    invalid += 1;
                }
            }
        }
        debug!("{valid} valid and {invalid} invalid rational automata");
    }

    #[test]
    fn validity_predicts_success_over_tropical_weights() {
        fastrand::seed(11);
        let config = RandomAutomaton {
            states: 5,
            spontaneous_density: 0.4,
            initials: 2,
            finals: 2,
            ..Default::default()
        };
        for _ in 0..100 {
            let aut = generate_random_automaton(
                Context::new(NullableSet::of_size(2), ZMin),
                &config,
                || fastrand::i64(-1..=4),
            );
            let valid = is_valid(&aut);
            for direction in [Direction::Backward, Direction::Forward] {
                let res = proper(&aut, direction, true, ProperAlgorithm::Auto);
                assert_eq!(valid, res.is_ok(), "{direction}\n{aut}");
            }
        }
    }

    #[test]
    fn chain_accepts_short_words() {
        let aut = optional_chain(Context::new(NullableSet::of_size(1), Z), 3);
        assert_eq!(aut.num_states(), 4);
        assert_eq!(num_spontaneous_transitions(&aut), 3);
        let res = eps_removal(&aut, Direction::Backward).unwrap();
        assert_eq!(evaluate(&res, &[]), Ok(1));
        assert_eq!(evaluate(&res, &['a', 'a']), Ok(3));
        assert_eq!(evaluate(&res, &['a'; 4]), Ok(0));
    }
}
