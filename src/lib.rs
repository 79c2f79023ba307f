//! Conversions between the three usual representations of a regular language over an alphabet
//! of single characters: regular expressions, deterministic finite automata (DFAs) and minimal DFAs.
//!
//! The crate implements three independent algorithms.
//! - [`DFA::from_regex`] builds a DFA directly from a regular expression. The expression is parsed
//!   into a [`regex::SyntaxTree`] whose nodes carry the `nullable`, `firstpos` and `lastpos` attributes,
//!   from which a followpos table is derived. The states of the resulting DFA are sets of positions,
//!   no intermediate NFA is constructed.
//! - [`DFA::to_regex`] recovers an equivalent regular expression through state elimination. Edges are
//!   labelled with [`regex::Fragment`]s which are lightly simplified while they are combined.
//! - [`DFA::minimize`] removes unreachable states, completes the transition function with an explicit
//!   dead state and refines the partition into accepting and rejecting states until it is stable.
//!   This is feature gated behind the `minimize` feature.
//!
//! The supported regular expressions consist of ASCII letters and digits as symbols, implicit concatenation,
//! alternation (`|`), Kleene star (`*`) and parentheses. The empty group `()` denotes the empty word.
//!
//! ```
//! use regular_automata::prelude::*;
//!
//! let dfa = DFA::from_regex("(a|b)*abb").unwrap();
//! assert!(dfa.accepts("babb"));
//! assert!(!dfa.accepts("abba"));
//!
//! let minimal = dfa.minimize();
//! assert_eq!(minimal.size(), 4);
//!
//! let regex = minimal.to_regex();
//! assert!(DFA::from_regex(&regex).unwrap().equivalent(&dfa));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use regular_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{CharAlphabet, Symbol},
        automaton::{StateId, DFA},
        error::{AutomatonError, ParseError},
        math,
        regex::{Fragment, SyntaxTree, END_MARKER, MAX_NESTING_DEPTH},
    };
    #[cfg(feature = "random")]
    pub use super::random::{generate_random_dfa, generate_random_regex};
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
pub mod alphabet;
pub use alphabet::CharAlphabet;

/// Errors that can occur when parsing regular expressions or manipulating automata.
pub mod error;

/// Defines the [`DFA`] type together with its textual representation, runs and language comparisons.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::DFA;

/// Parsing of regular expressions, the followpos construction and state elimination.
pub mod regex;

/// Contains the partition refinement minimization of DFAs. This is feature gated behind the `minimize` feature.
#[cfg(feature = "minimize")]
pub mod minimization;

/// Implements the generation of random automata and regular expressions.
#[cfg(feature = "random")]
pub mod random;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// The textbook automaton for `(a|b)*abb`, with states named as in most lecture notes.
    pub fn abb_dfa() -> DFA {
        "alphabet: ab
         initial: A
         final: D
         A a B
         A b A
         B a B
         B b C
         C a B
         C b D
         D a B
         D b A"
            .parse()
            .unwrap()
    }

    /// The running example from the wikipedia article on DFA minimization. It accepts
    /// all words that contain exactly one `b`, the states 0 and 1 as well as 2, 3 and 4 are equivalent.
    pub fn wiki_dfa() -> DFA {
        "alphabet: ab
         initial: 0
         final: 2 3 4
         0 a 1
         0 b 2
         1 a 0
         1 b 3
         2 a 4
         2 b 5
         3 a 4
         3 b 5
         4 a 4
         4 b 5
         5 a 5
         5 b 5"
            .parse()
            .unwrap()
    }

    /// Checks that `dfa` and `other` agree on every word over `alphabet` up to length `max_len`.
    pub fn agree_up_to(dfa: &DFA, other: &DFA, alphabet: &CharAlphabet, max_len: usize) -> bool {
        alphabet
            .words_up_to(max_len)
            .all(|word| dfa.accepts(&word) == other.accepts(&word))
    }

    #[test_log::test]
    fn fixtures_are_well_formed() {
        assert_eq!(abb_dfa().size(), 4);
        assert!(abb_dfa().is_complete());
        assert_eq!(wiki_dfa().size(), 6);
        assert!(wiki_dfa().accepts("aab"));
        assert!(!wiki_dfa().accepts("abab"));
    }
}
