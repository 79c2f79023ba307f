use std::collections::VecDeque;

use tracing::trace;

use crate::{
    math::{Map, Set},
    prelude::*,
};

impl DFA {
    /// Checks whether `self` is equivalent to `other`, i.e. whether the two DFAs accept
    /// the same language. The alphabets do not need to coincide, a symbol that is missing from
    /// one of the alphabets simply has no transitions there.
    pub fn equivalent(&self, other: &DFA) -> bool {
        self.separating_word(other).is_none()
    }

    /// Attempts to find a word that is accepted by precisely one of `self` and `other`. The search
    /// explores the product of both automata in breadth-first order, so the returned word is
    /// length-lexicographically minimal in the symmetric difference of the two languages.
    ///
    /// Missing transitions lead into an implicit sink on either side, represented as `None`.
    pub fn separating_word(&self, other: &DFA) -> Option<String> {
        let alphabet = self.alphabet().union(other.alphabet());
        let accepts = |dfa: &DFA, q: Option<StateId>| q.is_some_and(|q| dfa.is_accepting(q));

        let start = (self.initial(), other.initial());
        let mut seen = Set::from_iter([start]);
        let mut queue = VecDeque::from([(Vec::new(), start)]);

        while let Some((word, (p, q))) = queue.pop_front() {
            if accepts(self, p) != accepts(other, q) {
                trace!("found separating word of length {}", word.len());
                return Some(word.into_iter().collect());
            }
            if p.is_none() && q.is_none() {
                continue;
            }
            for sym in alphabet.universe() {
                let successor = (
                    p.and_then(|p| self.successor(p, sym)),
                    q.and_then(|q| other.successor(q, sym)),
                );
                if seen.insert(successor) {
                    let mut extended = word.clone();
                    extended.push(sym);
                    queue.push_back((extended, successor));
                }
            }
        }
        None
    }

    /// Decides whether `self` and `other` are the same automaton up to a renaming of the states.
    /// Both automata must have the same alphabet and every state must be reachable from the initial
    /// state, as the renaming is discovered through a simultaneous breadth-first search.
    pub fn is_isomorphic(&self, other: &DFA) -> bool {
        if self.alphabet() != other.alphabet() || self.size() != other.size() {
            return false;
        }
        let (p0, q0) = match (self.initial(), other.initial()) {
            (None, None) => return true,
            (Some(p0), Some(q0)) => (p0, q0),
            _ => return false,
        };

        let mut forward: Map<StateId, StateId> = Map::from_iter([(p0, q0)]);
        let mut backward: Map<StateId, StateId> = Map::from_iter([(q0, p0)]);
        let mut queue = VecDeque::from([(p0, q0)]);

        while let Some((p, q)) = queue.pop_front() {
            if self.is_accepting(p) != other.is_accepting(q) {
                return false;
            }
            for sym in self.alphabet().universe() {
                match (self.successor(p, sym), other.successor(q, sym)) {
                    (None, None) => {}
                    (Some(p1), Some(q1)) => match (forward.get(&p1), backward.get(&q1)) {
                        (None, None) => {
                            forward.insert(p1, q1);
                            backward.insert(q1, p1);
                            queue.push_back((p1, q1));
                        }
                        (Some(&image), Some(&preimage)) if image == q1 && preimage == p1 => {}
                        _ => return false,
                    },
                    _ => return false,
                }
            }
        }

        forward.len() == self.size()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{abb_dfa, wiki_dfa},
    };

    #[test_log::test]
    fn equivalence_checking() {
        let dfa = abb_dfa();
        assert!(dfa.equivalent(&dfa));
        assert!(dfa.equivalent(&dfa.clone()));

        let mut other = abb_dfa();
        other.mark_final("C").unwrap();
        assert!(!dfa.equivalent(&other));
        assert_eq!(dfa.separating_word(&other), Some("ab".to_string()));

        assert!(!dfa.equivalent(&wiki_dfa()));
        assert_eq!(dfa.separating_word(&wiki_dfa()), Some("b".to_string()));
    }

    #[test_log::test]
    fn partial_automata_are_compared_with_an_implicit_sink() {
        let partial: DFA = "alphabet: ab
                            initial: 0
                            final: 1
                            0 a 1"
            .parse()
            .unwrap();
        let complete: DFA = "alphabet: ab
                             initial: x
                             final: y
                             x a y
                             x b z
                             y a z
                             y b z
                             z a z
                             z b z"
            .parse()
            .unwrap();
        assert!(partial.equivalent(&complete));
        assert!(complete.equivalent(&partial));

        let empty = DFA::new(CharAlphabet::of_size(2));
        assert_eq!(empty.separating_word(&partial), Some("a".to_string()));
    }

    #[test_log::test]
    fn isomorphism() {
        let dfa = abb_dfa();
        let renamed: DFA = "alphabet: ab
                            initial: 0
                            final: 3
                            0 a 1
                            0 b 0
                            1 a 1
                            1 b 2
                            2 a 1
                            2 b 3
                            3 a 1
                            3 b 0"
            .parse()
            .unwrap();
        assert!(dfa.is_isomorphic(&renamed));
        assert!(renamed.is_isomorphic(&dfa));

        let mut different = renamed.clone();
        different.set_transition("3", 'b', "3").unwrap();
        assert!(!dfa.is_isomorphic(&different));
        assert!(!dfa.is_isomorphic(&wiki_dfa()));
    }
}
