use std::collections::{hash_map::Entry, VecDeque};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::ParseError,
    math::{Map, PositionSet},
    prelude::*,
};

/// Renders a set of positions as the name of a DFA state, e.g. `{0,1,3}`.
fn state_name(set: &PositionSet) -> String {
    format!("{{{}}}", set.iter().join(","))
}

impl DFA {
    /// Builds a DFA for `regex` directly from its syntax tree with the followpos construction.
    ///
    /// Every state of the result corresponds to a set of positions of the expression augmented
    /// with the [`END_MARKER`] and is named after that set. The initial state is the firstpos set of the
    /// root and a state is accepting if and only if it contains the position of the end marker. The
    /// transition function is partial, no dead state is created. The alphabet consists of the
    /// symbols that occur in `regex`.
    ///
    /// The empty string yields an automaton with a single rejecting state over the alphabet `{a}`,
    /// which accepts the empty language. Use `()` for the language that contains only the empty word.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa = DFA::from_regex("a(b|c)*").unwrap();
    /// assert!(dfa.accepts("abcb"));
    /// assert!(!dfa.accepts("ba"));
    /// assert_eq!(dfa.initial_state(), Some("{0}"));
    ///
    /// assert!(matches!(DFA::from_regex("a(b"), Err(ParseError::UnbalancedParenthesis { position: 1 })));
    /// ```
    pub fn from_regex(regex: &str) -> Result<DFA, ParseError> {
        if regex.is_empty() {
            debug!("empty regular expression, producing the automaton of the empty language");
            let mut dfa = DFA::new(CharAlphabet::of_size(1));
            let q = dfa.add_state("{}".to_string(), false);
            dfa.set_initial_id(q);
            return Ok(dfa);
        }

        let tree = SyntaxTree::parse(regex)?;
        let followpos = tree.followpos();
        let end = tree.end_marker_position();
        let alphabet = CharAlphabet::from_regex(regex);
        let mut dfa = DFA::new(alphabet.clone());

        let start = tree.root().firstpos().clone();
        let initial = dfa.add_state(state_name(&start), start.contains(end));
        dfa.set_initial_id(initial);

        let mut interned: Map<PositionSet, StateId> = Map::default();
        interned.insert(start.clone(), initial);
        let mut unmarked = VecDeque::from([(initial, start)]);

        while let Some((source, positions)) = unmarked.pop_front() {
            for sym in alphabet.universe() {
                let mut target = PositionSet::new();
                for p in positions.iter().filter(|&p| tree.symbol_at(p) == sym) {
                    target.union_with(followpos.get(p));
                }
                if target.is_empty() {
                    continue;
                }

                let target_id = match interned.entry(target) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let set = entry.key().clone();
                        let id = dfa.add_state(state_name(&set), set.contains(end));
                        trace!("discovered state {} on {sym}", state_name(&set));
                        unmarked.push_back((id, set));
                        *entry.insert(id)
                    }
                };
                dfa.add_transition(source, sym, target_id);
            }
        }

        debug!(
            "built DFA with {} states for \"{regex}\" from {} positions",
            dfa.size(),
            tree.leaf_count()
        );
        Ok(dfa)
    }
}
