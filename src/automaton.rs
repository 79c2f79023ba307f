use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;

use crate::{
    alphabet::{CharAlphabet, Symbol},
    error::AutomatonError,
    math::Bijection,
};

mod dfa;
mod dot;
mod reachability;
mod text;

pub use reachability::{MinimalRepresentative, MinimalRepresentatives};

/// Type of the indices with which states are addressed internally.
pub type StateId = u32;

/// A deterministic finite automaton (DFA) over a [`CharAlphabet`].
///
/// States are identified by their name on the outside and by a [`StateId`] on the inside, the two
/// are kept in a [`Bijection`]. The transition function is partial, a missing transition means that
/// the run gets stuck and the word is rejected. This is different from a transition into an explicit
/// (non-accepting) dead state, which is a state like any other.
///
/// A DFA without states describes the empty language and has no initial state. As soon as states exist,
/// one of them should be designated as initial through [`DFA::set_initial`].
///
/// # Example
/// ```
/// use regular_automata::prelude::*;
///
/// let mut dfa = DFA::new(CharAlphabet::of_size(2));
/// dfa.create_state("even", true).unwrap();
/// dfa.create_state("odd", false).unwrap();
/// dfa.set_initial("even").unwrap();
/// dfa.set_transition("even", 'a', "odd").unwrap();
/// dfa.set_transition("odd", 'a', "even").unwrap();
///
/// assert!(dfa.accepts("aa"));
/// assert!(!dfa.accepts("a"));
/// // there is no transition on `b`
/// assert!(!dfa.accepts("b"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct DFA {
    alphabet: CharAlphabet,
    names: Bijection<StateId, String>,
    accepting: BTreeSet<StateId>,
    transitions: BTreeMap<(StateId, Symbol), StateId>,
    initial: Option<StateId>,
    next_id: StateId,
}

impl DFA {
    /// Creates a DFA without any states over the given alphabet.
    pub fn new(alphabet: CharAlphabet) -> Self {
        Self {
            alphabet,
            names: Bijection::new(),
            accepting: BTreeSet::new(),
            transitions: BTreeMap::new(),
            initial: None,
            next_id: 0,
        }
    }

    /// Gives a reference to the alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the automaton has no states.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Creates a state with the given name, which is accepting if `accepting` is true.
    pub fn create_state<S: Into<String>>(
        &mut self,
        name: S,
        accepting: bool,
    ) -> Result<StateId, AutomatonError> {
        let name = name.into();
        if self.names.contains_right(&name) {
            return Err(AutomatonError::DuplicateState(name));
        }
        Ok(self.add_state(name, accepting))
    }

    /// Adds a state whose name is known to be fresh.
    pub(crate) fn add_state(&mut self, name: String, accepting: bool) -> StateId {
        debug_assert!(!self.names.contains_right(&name));
        let id = self.next_id;
        self.next_id += 1;
        self.names.insert(id, name);
        if accepting {
            self.accepting.insert(id);
        }
        id
    }

    /// Adds a transition between two existing states on a symbol of the alphabet.
    pub(crate) fn add_transition(&mut self, source: StateId, symbol: Symbol, target: StateId) {
        debug_assert!(self.alphabet.contains(symbol));
        debug_assert!(self.names.contains_left(&source) && self.names.contains_left(&target));
        self.transitions.insert((source, symbol), target);
    }

    pub(crate) fn set_initial_id(&mut self, id: StateId) {
        debug_assert!(self.names.contains_left(&id));
        self.initial = Some(id);
    }

    /// Looks up the id of the state with the given name.
    pub fn id_of(&self, name: &str) -> Option<StateId> {
        self.names.get_by_right(name).copied()
    }

    fn existing(&self, name: &str) -> Result<StateId, AutomatonError> {
        self.id_of(name)
            .ok_or_else(|| AutomatonError::UnknownState(name.to_string()))
    }

    /// Gives the name of the state with the given id.
    pub fn name_of(&self, id: StateId) -> Option<&str> {
        self.names.get_by_left(&id).map(String::as_str)
    }

    /// Designates the state with the given name as initial, replacing the previous initial state.
    pub fn set_initial(&mut self, name: &str) -> Result<(), AutomatonError> {
        self.initial = Some(self.existing(name)?);
        Ok(())
    }

    /// Removes a state together with all transitions that leave or enter it. If the state was
    /// initial, the automaton has no initial state afterwards.
    pub fn delete_state(&mut self, name: &str) -> Result<(), AutomatonError> {
        let id = self.existing(name)?;
        self.names.remove_by_left(&id);
        self.accepting.remove(&id);
        self.transitions
            .retain(|&(source, _), target| source != id && *target != id);
        if self.initial == Some(id) {
            self.initial = None;
        }
        Ok(())
    }

    /// Sets the transition from `source` on `symbol` to `target`, overwriting an existing one.
    pub fn set_transition(
        &mut self,
        source: &str,
        symbol: Symbol,
        target: &str,
    ) -> Result<(), AutomatonError> {
        if !self.alphabet.contains(symbol) {
            return Err(AutomatonError::UnknownSymbol(symbol));
        }
        let source = self.existing(source)?;
        let target = self.existing(target)?;
        self.add_transition(source, symbol, target);
        Ok(())
    }

    /// Returns true if the state named `state` has a transition on `symbol`.
    pub fn has_transition(&self, state: &str, symbol: Symbol) -> bool {
        self.transition(state, symbol).is_some()
    }

    /// Gives the name of the state that is reached from `state` on `symbol`, if the transition exists.
    pub fn transition(&self, state: &str, symbol: Symbol) -> Option<&str> {
        self.successor(self.id_of(state)?, symbol)
            .and_then(|target| self.name_of(target))
    }

    /// Marks the state named `state` as accepting.
    pub fn mark_final(&mut self, state: &str) -> Result<(), AutomatonError> {
        let id = self.existing(state)?;
        self.accepting.insert(id);
        Ok(())
    }

    /// Returns true if a state named `state` exists and is accepting.
    pub fn is_final(&self, state: &str) -> bool {
        self.id_of(state).is_some_and(|id| self.is_accepting(id))
    }

    /// Returns true if a state named `state` exists and is the initial state.
    pub fn is_initial(&self, state: &str) -> bool {
        self.initial.is_some() && self.id_of(state) == self.initial
    }

    /// Gives the name of the initial state.
    pub fn initial_state(&self) -> Option<&str> {
        self.initial.and_then(|id| self.name_of(id))
    }

    /// The id of the initial state.
    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    /// Iterates over the names of all states, ordered by creation.
    pub fn state_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|(_, name)| name.as_str())
    }

    /// Iterates over the ids of all states in ascending order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.names.left_values().copied()
    }

    /// Returns the names of all accepting states.
    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.accepting.iter().filter_map(|&id| self.name_of(id))
    }

    /// Returns true if the state with the given id is accepting.
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.accepting.contains(&id)
    }

    /// Gives the id of the state reached from `source` on `symbol`.
    pub fn successor(&self, source: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Iterates over all transitions as `(source, symbol, target)` triples, ordered by source and symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(source, symbol), &target)| (source, symbol, target))
    }

    /// Returns true if every state has a transition for every symbol.
    pub fn is_complete(&self) -> bool {
        self.state_ids().all(|q| {
            self.alphabet
                .universe()
                .all(|sym| self.transitions.contains_key(&(q, sym)))
        })
    }

    /// Runs `word` from the state `origin` and returns the reached state, or `None` if the run
    /// gets stuck on a missing transition.
    pub fn run_from<W: IntoIterator<Item = Symbol>>(
        &self,
        origin: StateId,
        word: W,
    ) -> Option<StateId> {
        word.into_iter()
            .try_fold(origin, |q, sym| self.successor(q, sym))
    }

    /// Runs `word` from the initial state.
    pub fn run<W: IntoIterator<Item = Symbol>>(&self, word: W) -> Option<StateId> {
        self.run_from(self.initial?, word)
    }

    /// Returns true if the run of `word` from the initial state exists and ends in an accepting state.
    pub fn accepts(&self, word: &str) -> bool {
        self.run(word.chars()).is_some_and(|q| self.is_accepting(q))
    }

    /// Returns a string representation of the transition table, accepting states are
    /// marked with a `*`, the initial state with an arrow.
    pub fn build_transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(String::from)),
        );
        for id in self.state_ids() {
            let name = self.name_of(id).unwrap_or_default();
            let mut row = vec![format!(
                "{}{}{}",
                if self.initial == Some(id) { "-> " } else { "" },
                name,
                if self.is_accepting(id) { " *" } else { "" }
            )];
            for sym in self.alphabet.universe() {
                row.push(
                    self.successor(id, sym)
                        .and_then(|target| self.name_of(target))
                        .unwrap_or("-")
                        .to_string(),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA over {{{}}} with {} states",
            self.alphabet.universe().join(", "),
            self.size()
        )?;
        write!(f, "{}", self.build_transition_table())
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::abb_dfa};

    #[test_log::test]
    fn manipulation_by_name() {
        let mut dfa = DFA::new(CharAlphabet::of_size(2));
        dfa.create_state("p", false).unwrap();
        dfa.create_state("q", true).unwrap();
        assert_eq!(
            dfa.create_state("p", true),
            Err(AutomatonError::DuplicateState("p".into()))
        );
        assert_eq!(
            dfa.set_initial("r"),
            Err(AutomatonError::UnknownState("r".into()))
        );
        dfa.set_initial("p").unwrap();
        dfa.set_transition("p", 'a', "q").unwrap();
        assert_eq!(
            dfa.set_transition("p", 'c', "q"),
            Err(AutomatonError::UnknownSymbol('c'))
        );

        assert!(dfa.has_transition("p", 'a'));
        assert!(!dfa.has_transition("p", 'b'));
        assert_eq!(dfa.transition("p", 'a'), Some("q"));
        assert!(dfa.is_initial("p"));
        assert!(!dfa.is_initial("q"));
        assert!(dfa.is_final("q"));
        assert!(!dfa.is_final("p"));
        assert_eq!(dfa.initial_state(), Some("p"));

        dfa.mark_final("p").unwrap();
        assert!(dfa.accepts(""));
        assert!(!dfa.is_complete());
    }

    #[test_log::test]
    fn deleting_states_removes_transitions() {
        let mut dfa = abb_dfa();
        dfa.delete_state("B").unwrap();
        assert_eq!(dfa.size(), 3);
        assert!(!dfa.has_transition("A", 'a'));
        assert!(!dfa.has_transition("C", 'a'));
        assert_eq!(dfa.transition("C", 'b'), Some("D"));
        assert!(dfa.transitions().all(|(p, _, q)| {
            dfa.name_of(p).is_some() && dfa.name_of(q).is_some()
        }));

        dfa.delete_state("A").unwrap();
        assert_eq!(dfa.initial_state(), None);
        assert!(!dfa.accepts("abb"));
        assert!(dfa.delete_state("A").is_err());
    }

    #[test_log::test]
    fn runs_and_acceptance() {
        let dfa = abb_dfa();
        assert!(dfa.accepts("abb"));
        assert!(dfa.accepts("aabababb"));
        assert!(!dfa.accepts(""));
        assert!(!dfa.accepts("abba"));
        assert!(!dfa.accepts("abc"));
        assert_eq!(dfa.run("ab".chars()).and_then(|q| dfa.name_of(q)), Some("C"));
    }

    #[test]
    fn transition_table_lists_every_state() {
        let table = abb_dfa().build_transition_table();
        assert!(table.contains("-> A"));
        assert!(table.contains("D *"));
        assert_eq!(table.lines().count(), 8);
    }
}
