use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::prelude::*;

/// A vertex of the generalized automaton used during state elimination: either a state of the
/// DFA, or the virtual accepting vertex that every accepting state has an ε edge to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Vertex {
    State(StateId),
    Accept,
}

type Edges = BTreeMap<(Vertex, Vertex), Fragment>;

/// Adds `fragment` to the edge between `from` and `to`, alternating it with an existing label.
fn add_edge(edges: &mut Edges, from: Vertex, to: Vertex, fragment: Fragment) {
    let label = match edges.remove(&(from, to)) {
        Some(existing) => existing.alternate(fragment),
        None => fragment,
    };
    edges.insert((from, to), label);
}

/// Removes `state` from the generalized automaton, every path `from -> state -> to` is replaced by an
/// edge `from -> to` labelled `(in)(loop)*(out)`.
fn eliminate(edges: &mut Edges, state: Vertex) {
    let self_loop = edges.remove(&(state, state)).map(Fragment::star);

    let incoming: Vec<_> = edges
        .iter()
        .filter(|((_, to), _)| *to == state)
        .map(|((from, _), label)| (*from, label.clone()))
        .collect();
    let outgoing: Vec<_> = edges
        .iter()
        .filter(|((from, _), _)| *from == state)
        .map(|((_, to), label)| (*to, label.clone()))
        .collect();
    edges.retain(|(from, to), _| *from != state && *to != state);

    trace!(
        "eliminating {state:?} with {} incoming and {} outgoing edges",
        incoming.len(),
        outgoing.len()
    );

    for (from, in_label) in &incoming {
        for (to, out_label) in &outgoing {
            let through = match &self_loop {
                Some(l) => in_label.clone().concatenate(l.clone()),
                None => in_label.clone(),
            }
            .concatenate(out_label.clone());
            add_edge(edges, *from, *to, through);
        }
    }
}

impl DFA {
    /// Computes a regular expression for the language of `self` through state elimination.
    ///
    /// The automaton is viewed as a generalized automaton whose edges are labelled with
    /// [`Fragment`]s, extended by a virtual accepting vertex that every accepting state has an ε edge
    /// to. All states except the initial one are eliminated in ascending order of their ids, after which
    /// the expression can be read off the remaining two vertices. The result is not minimal, but
    /// fragments are simplified along the way and it uses only as many parentheses as necessary.
    ///
    /// The empty string is returned if the automaton has no initial state or its language is empty,
    /// and [`DFA::from_regex`] maps the empty string back to an automaton for the empty language.
    /// Over an empty alphabet the only other language is `{ε}`, for which the result is `()`.
    ///
    /// Every symbol of the alphabet is a valid symbol of the regex grammar, so the result can always be
    /// parsed again, with one limitation: eliminating states of large automata may produce expressions
    /// whose groups nest deeper than [`MAX_NESTING_DEPTH`], which [`DFA::from_regex`] rejects with
    /// [`ParseError::NestingTooDeep`].
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa: DFA = "alphabet: a
    ///                 initial: q
    ///                 final: q
    ///                 q a q"
    ///     .parse()
    ///     .unwrap();
    /// assert_eq!(dfa.to_regex(), "a*");
    /// ```
    pub fn to_regex(&self) -> String {
        let Some(initial) = self.initial() else {
            return String::new();
        };
        if self.alphabet().is_empty() {
            let regex = if self.is_accepting(initial) { "()" } else { "" };
            debug!("automaton without symbols accepts \"{regex}\"");
            return regex.to_string();
        }

        let mut edges = Edges::new();
        for q in self.state_ids() {
            if self.is_accepting(q) {
                add_edge(&mut edges, Vertex::State(q), Vertex::Accept, Fragment::Epsilon);
            }
        }
        for (source, symbol, target) in self.transitions() {
            add_edge(
                &mut edges,
                Vertex::State(source),
                Vertex::State(target),
                Fragment::Symbol(symbol),
            );
        }

        for q in self.state_ids().filter(|&q| q != initial) {
            eliminate(&mut edges, Vertex::State(q));
        }

        let start = Vertex::State(initial);
        let Some(accepting) = edges.remove(&(start, Vertex::Accept)) else {
            debug!("no accepting state is reachable, the language is empty");
            return String::new();
        };
        let regex = match edges.remove(&(start, start)) {
            Some(self_loop) => self_loop.star().concatenate(accepting),
            None => accepting,
        };
        debug_assert!(edges.is_empty(), "only edges between start and accept remain");

        let regex = regex.to_string();
        debug!("state elimination on {} states produced \"{regex}\"", self.size());
        regex
    }
}
