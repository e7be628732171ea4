use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    automaton::{LabelOf, WeightOf},
    math::{Map, Set},
    prelude::*,
};

/// Removes the spontaneous transitions of `aut` by computing, for every pair of states `p` and
/// `q` incident to a spontaneous transition, the total weight `d(p, q)` of all spontaneous
/// paths from `p` to `q`, the empty path included. The outgoing transitions of every such `p`
/// are then replaced by `d(p, q)` times the outgoing transitions of `q`, summed over all `q`.
///
/// The distances are obtained by a Floyd-Warshall closure, which takes the star of the
/// spontaneous loop weight of each state in turn and fails if one of them is not defined. In
/// that case `aut` is left untouched.
///
/// With `prune`, states that had incoming spontaneous transitions and are left without any
/// incoming transition are deleted.
pub fn distance_remover<A: AutomatonMut>(aut: &mut A, prune: bool) -> Result<(), StarError> {
    let Some(one) = aut.labelset().one() else {
        return Ok(());
    };
    let ws = aut.weightset().clone();

    let spontaneous: Vec<_> = aut.transitions().filter(|t| aut.is_spontaneous(*t)).collect();
    if spontaneous.is_empty() {
        return Ok(());
    }

    let nodes: Vec<StateIndex> = spontaneous
        .iter()
        .flat_map(|t| [aut.src_of(*t), aut.dst_of(*t)])
        .sorted()
        .dedup()
        .collect();
    let position: Map<StateIndex, usize> = nodes.iter().enumerate().map(|(i, s)| (*s, i)).collect();
    let n = nodes.len();
    debug!("computing spontaneous distances between {n} states");

    let mut dist = vec![vec![ws.zero(); n]; n];
    for t in &spontaneous {
        let (i, j) = (position[&aut.src_of(*t)], position[&aut.dst_of(*t)]);
        dist[i][j] = ws.add(&dist[i][j], &aut.weight_of(*t));
    }

    for k in 0..n {
        let star = ws.star(&dist[k][k])?;
        let prev = dist.clone();
        for i in 0..n {
            if ws.is_zero(&prev[i][k]) {
                continue;
            }
            let through = ws.mul(&prev[i][k], &star);
            for j in 0..n {
                if ws.is_zero(&prev[k][j]) {
                    continue;
                }
                dist[i][j] = ws.add(&prev[i][j], &ws.mul(&through, &prev[k][j]));
            }
        }
    }
    // from paths of positive length to all paths
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = ws.add(&ws.one(), &row[i]);
    }

    let had_spontaneous_in: Set<StateIndex> = spontaneous.iter().map(|t| aut.dst_of(*t)).collect();
    for t in spontaneous {
        aut.del_transition(t);
    }

    let outgoing: Vec<Vec<(StateIndex, LabelOf<A>, WeightOf<A>)>> = nodes
        .iter()
        .map(|q| {
            aut.all_out(*q)
                .map(|t| (aut.dst_of(t), aut.label_of(t), aut.weight_of(t)))
                .collect()
        })
        .collect();

    for (i, p) in nodes.iter().enumerate() {
        let previous: Vec<_> = aut.all_out(*p).collect();
        for t in previous {
            aut.del_transition(t);
        }
        for (j, transitions) in outgoing.iter().enumerate() {
            if ws.is_zero(&dist[i][j]) {
                continue;
            }
            for (dst, label, weight) in transitions {
                debug_assert!(label != &one);
                aut.add_transition(*p, *dst, label.clone(), ws.mul(&dist[i][j], weight));
            }
        }
        trace!("state {p} now has {} outgoing transitions", aut.all_out(*p).count());
    }

    if prune {
        for s in had_spontaneous_in.into_iter().sorted() {
            if aut.has_state(s) && aut.all_in(s).next().is_none() {
                trace!("pruning state {s}");
                aut.del_state(s);
            }
        }
    }
    Ok(())
}
