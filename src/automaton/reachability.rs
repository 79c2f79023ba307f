use std::collections::VecDeque;

use crate::{
    alphabet::Symbol,
    math::Set,
    prelude::*,
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<Symbol>, StateId);

/// Struct that can return the minimal representatives of a [`DFA`]. A minimal representative
/// for a state `q` is the length-lexicographically minimal string with which `q` can be reached
/// from a given state. States are produced in breadth-first order, so the iterator doubles as a
/// reachability analysis.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    dfa: &'a DFA,
    seen: Set<StateId>,
    queue: VecDeque<MinimalRepresentative>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the search in `origin`.
    pub fn new(dfa: &'a DFA, origin: StateId) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self { dfa, seen, queue }
    }

    /// An iterator that yields nothing, used for automata without initial state.
    fn exhausted(dfa: &'a DFA) -> Self {
        Self {
            dfa,
            seen: Set::default(),
            queue: VecDeque::new(),
        }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for sym in self.dfa.alphabet().universe() {
            if let Some(p) = self.dfa.successor(q, sym) {
                if self.seen.insert(p) {
                    let mut new_access = access.clone();
                    new_access.push(sym);
                    self.queue.push_back((new_access, p));
                }
            }
        }
        Some((access, q))
    }
}

impl DFA {
    /// Returns an iterator over the minimal representatives of all states that are reachable
    /// from the initial state. If there is no initial state, the iterator is empty.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        match self.initial() {
            Some(initial) => MinimalRepresentatives::new(self, initial),
            None => MinimalRepresentatives::exhausted(self),
        }
    }

    /// Returns the ids of all states that are reachable from the initial state in breadth-first order.
    /// The initial state (if it exists) always comes first.
    pub fn reachable_state_ids(&self) -> Vec<StateId> {
        self.minimal_representatives().map(|(_, q)| q).collect()
    }

    /// Tries to find an accepted word, the returned word is length-lexicographically minimal
    /// among all accepted words.
    pub fn give_word(&self) -> Option<String> {
        self.minimal_representatives().find_map(|(mr, index)| {
            if self.is_accepting(index) {
                Some(mr.into_iter().collect())
            } else {
                None
            }
        })
    }

    /// Returns true if and only if the accepted language is empty.
    pub fn is_empty_language(&self) -> bool {
        self.give_word().is_none()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::{prelude::*, tests::abb_dfa};

    #[test]
    fn reachable_states() {
        let mut dfa = abb_dfa();
        dfa.create_state("X", true).unwrap();
        dfa.set_transition("X", 'a', "A").unwrap();

        let reachable = dfa
            .reachable_state_ids()
            .into_iter()
            .map(|q| dfa.name_of(q).unwrap())
            .collect_vec();
        assert_eq!(reachable, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn minimal_representatives_are_minimal() {
        let dfa = abb_dfa();
        let reps = dfa
            .minimal_representatives()
            .map(|(rep, q)| (rep.into_iter().collect::<String>(), dfa.name_of(q).unwrap()))
            .collect_vec();
        assert_eq!(
            reps,
            vec![
                ("".to_string(), "A"),
                ("a".to_string(), "B"),
                ("ab".to_string(), "C"),
                ("abb".to_string(), "D")
            ]
        );
        assert_eq!(dfa.give_word(), Some("abb".to_string()));
    }

    #[test]
    fn empty_language() {
        let mut dfa = abb_dfa();
        assert!(!dfa.is_empty_language());
        dfa.delete_state("C").unwrap();
        assert!(dfa.is_empty_language());
        assert!(DFA::new(CharAlphabet::of_size(1)).is_empty_language());
    }
}
