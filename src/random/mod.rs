use fastrand::Rng;
use tracing::trace;

use crate::prelude::*;

/// Generates a random [`DFA`] with `size` states named `q0`, `q1`, ... over an alphabet of
/// `symbols` distinct letters. The algorithm is as follows:
/// 1. Create `size` states, each of which is accepting with probability 1/2, and make `q0` initial.
/// 2. For each state and each symbol, with probability 3/4 add a transition to a uniformly drawn state.
///
/// The result is in general partial and may contain states that are unreachable from `q0`. If
/// `size` is zero, the automaton has no states at all.
pub fn generate_random_dfa(rng: &mut Rng, symbols: usize, size: usize) -> DFA {
    let alphabet = CharAlphabet::of_size(symbols);
    let mut dfa = DFA::new(alphabet.clone());
    if size == 0 {
        return dfa;
    }

    let states: Vec<StateId> = (0..size)
        .map(|i| dfa.add_state(format!("q{i}"), rng.bool()))
        .collect();
    dfa.set_initial_id(states[0]);

    for &q in &states {
        for sym in alphabet.universe() {
            if rng.u8(..4) > 0 {
                dfa.add_transition(q, sym, states[rng.usize(..size)]);
            }
        }
    }
    trace!(
        "generated random DFA with {} states and {} transitions",
        dfa.size(),
        dfa.transitions().count()
    );
    dfa
}

/// Generates a random regular expression over the first `symbols` letters of the alphabet that
/// [`SyntaxTree::parse`] accepts. `depth` bounds the nesting of operators, at depth zero a single
/// symbol (or the empty word `()`, if `symbols` is zero) is produced.
pub fn generate_random_regex(rng: &mut Rng, symbols: usize, depth: usize) -> String {
    let alphabet = CharAlphabet::of_size(symbols);
    let regex = random_fragment(rng, &alphabet, depth).to_string();
    trace!("generated random regex \"{regex}\"");
    regex
}

fn random_fragment(rng: &mut Rng, alphabet: &CharAlphabet, depth: usize) -> Fragment {
    if alphabet.is_empty() {
        return Fragment::Epsilon;
    }
    let choice = if depth == 0 { 0 } else { rng.u8(..5) };
    match choice {
        1 => random_fragment(rng, alphabet, depth - 1)
            .alternate(random_fragment(rng, alphabet, depth - 1)),
        2 | 3 => random_fragment(rng, alphabet, depth - 1)
            .concatenate(random_fragment(rng, alphabet, depth - 1)),
        4 => random_fragment(rng, alphabet, depth - 1).star(),
        _ => Fragment::Symbol(alphabet[rng.usize(..alphabet.size())]),
    }
}
