use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    math::{Map, Partition},
    prelude::*,
};

/// The reachable part of a DFA with a complete transition function. States are numbered densely in
/// breadth-first order, so `0` is the initial state, and the last index is the added dead state.
struct Completed {
    successors: Vec<Vec<usize>>,
    accepting: Vec<bool>,
}

impl Completed {
    fn new(dfa: &DFA) -> Self {
        let reachable = dfa.reachable_state_ids();
        let dead = reachable.len();
        let index: Map<StateId, usize> = reachable
            .iter()
            .enumerate()
            .map(|(i, &q)| (q, i))
            .collect();

        let mut successors: Vec<Vec<usize>> = reachable
            .iter()
            .map(|&q| {
                dfa.alphabet()
                    .universe()
                    .map(|sym| {
                        dfa.successor(q, sym)
                            .and_then(|p| index.get(&p).copied())
                            .unwrap_or(dead)
                    })
                    .collect()
            })
            .collect();
        successors.push(vec![dead; dfa.alphabet().size()]);

        let mut accepting: Vec<bool> = reachable.iter().map(|&q| dfa.is_accepting(q)).collect();
        accepting.push(false);

        trace!(
            "completed {} reachable states of {} with dead state {dead}",
            reachable.len(),
            dfa.size()
        );
        Self {
            successors,
            accepting,
        }
    }

    fn dead(&self) -> usize {
        self.successors.len() - 1
    }

    fn states(&self) -> std::ops::Range<usize> {
        0..self.successors.len()
    }
}

/// Refines `partition` until no class can be split any further. In every round two states stay
/// together if and only if they are in the same class and each symbol leads them into the same class.
fn refine_until_stable(completed: &Completed, mut partition: Partition<usize>) -> Partition<usize> {
    let mut round = 0;
    loop {
        round += 1;
        let class_of = partition.class_map();
        let refined = partition.refine_by(|q| {
            completed.successors[*q]
                .iter()
                .map(|p| class_of[p])
                .collect::<Vec<_>>()
        });
        trace!(
            "refinement round {round} produced {} classes from {}",
            refined.size(),
            partition.size()
        );
        if refined.size() == partition.size() {
            return refined;
        }
        partition = refined;
    }
}

/// Minimizes the part of `dfa` that is reachable from its initial state.
pub(crate) fn moore_partition_refinement(dfa: &DFA) -> DFA {
    let completed = Completed::new(dfa);
    let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
        completed.states().partition(|&q| completed.accepting[q]);

    let stable = refine_until_stable(&completed, Partition::new([accepting, rejecting]));
    let class_of = stable.class_map();
    let dead_class = class_of[&completed.dead()];

    let mut minimal = DFA::new(dfa.alphabet().clone());
    let initial_class = class_of[&0];
    if initial_class == dead_class {
        debug!("the language is empty, minimal DFA has no states");
        return minimal;
    }

    let representatives: Vec<usize> = stable
        .iter()
        .map(|class| class.first().copied().unwrap_or_default())
        .collect();
    let successor =
        |class: usize, j: usize| class_of[&completed.successors[representatives[class]][j]];

    // live classes are named in the order in which a breadth-first search discovers them
    let mut order = vec![];
    let mut ids: Map<usize, StateId> = Map::default();
    let mut queue = VecDeque::from([initial_class]);
    while let Some(class) = queue.pop_front() {
        if ids.contains_key(&class) {
            continue;
        }
        let id = minimal.add_state(
            order.len().to_string(),
            completed.accepting[representatives[class]],
        );
        ids.insert(class, id);
        order.push(class);
        queue.extend(
            (0..dfa.alphabet().size())
                .map(|j| successor(class, j))
                .filter(|target| *target != dead_class && !ids.contains_key(target)),
        );
    }
    minimal.set_initial_id(ids[&initial_class]);

    for &class in &order {
        for (j, sym) in dfa.alphabet().universe().enumerate() {
            if let Some(&target) = ids.get(&successor(class, j)) {
                minimal.add_transition(ids[&class], sym, target);
            }
        }
    }

    debug!(
        "minimized DFA from {} to {} states",
        dfa.size(),
        minimal.size()
    );
    minimal
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{abb_dfa, agree_up_to, wiki_dfa},
    };

    /// Checks that no two states of `dfa` accept the same language.
    fn pairwise_distinguishable(dfa: &DFA) -> bool {
        let names: Vec<String> = dfa.state_names().map(str::to_string).collect();
        let from = |name: &str| {
            let mut shifted = dfa.clone();
            shifted.set_initial(name).unwrap();
            shifted
        };
        names.iter().enumerate().all(|(i, p)| {
            names[i + 1..]
                .iter()
                .all(|q| from(p).separating_word(&from(q)).is_some())
        })
    }

    /// Checks that every state of `dfa` can reach an accepting state.
    fn all_states_live(dfa: &DFA) -> bool {
        dfa.state_names().all(|name| {
            let mut shifted = dfa.clone();
            shifted.set_initial(name).unwrap();
            !shifted.is_empty_language()
        })
    }

    #[test_log::test]
    fn wikipedia_example() {
        let dfa = wiki_dfa();
        let minimal = dfa.minimize();
        // {0, 1} and {2, 3, 4} collapse, the sink 5 ends up in the dead class
        assert_eq!(minimal.size(), 2);
        assert_eq!(minimal.state_names().collect::<Vec<_>>(), vec!["0", "1"]);
        assert!(!minimal.is_final("0"));
        assert!(minimal.is_final("1"));
        assert_eq!(minimal.transition("0", 'a'), Some("0"));
        assert_eq!(minimal.transition("0", 'b'), Some("1"));
        assert_eq!(minimal.transition("1", 'a'), Some("1"));
        assert!(!minimal.has_transition("1", 'b'));
        assert!(minimal.equivalent(&dfa));
        assert!(agree_up_to(&dfa, &minimal, dfa.alphabet(), 7));
    }

    #[test_log::test]
    fn textbook_automaton_is_a_fixed_point() {
        let constructed = DFA::from_regex("(a|b)*abb").unwrap();
        let minimal = constructed.minimize();
        assert_eq!(constructed.size(), 4);
        assert_eq!(minimal.size(), 4);
        assert!(minimal.is_isomorphic(&constructed));
        assert!(minimal.is_isomorphic(&abb_dfa()));
        assert!(pairwise_distinguishable(&minimal));
    }

    #[test_log::test]
    fn kleene_star_has_one_state() {
        let minimal = DFA::from_regex("a*").unwrap().minimize();
        assert_eq!(minimal.size(), 1);
        assert_eq!(minimal.initial_state(), Some("0"));
        assert!(minimal.is_final("0"));
        assert_eq!(minimal.transition("0", 'a'), Some("0"));
    }

    #[test_log::test]
    fn unreachable_states_are_ignored() {
        let mut dfa = abb_dfa();
        dfa.create_state("E", true).unwrap();
        dfa.set_transition("E", 'a', "D").unwrap();
        dfa.set_transition("E", 'b', "E").unwrap();
        assert_eq!(dfa.size(), 5);
        let minimal = dfa.minimize();
        assert_eq!(minimal.size(), 4);
        assert!(minimal.is_isomorphic(&abb_dfa().minimize()));
    }

    #[test_log::test]
    fn minimization_is_idempotent() {
        for dfa in [abb_dfa(), wiki_dfa(), DFA::from_regex("(ab|ba)*a*").unwrap()] {
            let once = dfa.minimize();
            let twice = once.minimize();
            assert!(twice.is_isomorphic(&once));
            assert_eq!(
                once.state_names().collect::<Vec<_>>(),
                twice.state_names().collect::<Vec<_>>()
            );
        }
    }

    #[test_log::test]
    fn empty_language_has_no_states() {
        let rejecting: DFA = "alphabet: ab
                              initial: p
                              p a q
                              q b p"
            .parse()
            .unwrap();
        let minimal = rejecting.minimize();
        assert!(minimal.is_empty());
        assert_eq!(minimal.initial_state(), None);
        assert_eq!(minimal.alphabet().to_string(), "ab");
        assert_eq!(minimal.minimize(), minimal);
        assert_eq!(minimal.to_regex(), "");

        let no_initial: DFA = "alphabet: a\nfinal: q\nq a q".parse().unwrap();
        assert!(no_initial.minimize().is_empty());

        assert!(DFA::from_regex("").unwrap().minimize().is_empty());
    }

    #[test_log::test]
    fn empty_alphabet() {
        let epsilon = DFA::from_regex("()").unwrap().minimize();
        assert_eq!(epsilon.size(), 1);
        assert!(epsilon.accepts(""));

        let nothing: DFA = "alphabet:\ninitial: q".parse().unwrap();
        assert!(nothing.minimize().is_empty());
    }

    #[test_log::test]
    fn partial_automata_lose_their_sinks() {
        let dfa = DFA::from_regex("ab|ac|b*").unwrap();
        let minimal = dfa.minimize();
        assert!(minimal.equivalent(&dfa));
        assert!(all_states_live(&minimal));
        assert!(pairwise_distinguishable(&minimal));
        assert!(minimal
            .transitions()
            .all(|(p, _, q)| minimal.name_of(p).is_some() && minimal.name_of(q).is_some()));
    }
}
