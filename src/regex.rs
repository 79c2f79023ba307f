//! Regular expressions over ASCII letters and digits.
//!
//! The grammar that is accepted by [`SyntaxTree::parse`] (and thus by [`crate::DFA::from_regex`]) is
//! ```text
//! Alternation   → Concatenation ('|' Concatenation)*
//! Concatenation → Star+
//! Star          → Atom '*'*
//! Atom          → '(' ')' | '(' Alternation ')' | symbol
//! ```
//! where a symbol is any ASCII letter or digit (see [`crate::CharAlphabet::is_symbol`]) and `()` stands for the empty word. The empty
//! string is not a regular expression in this grammar, [`crate::DFA::from_regex`] maps it to an
//! automaton for the empty language.

mod fragment;
mod from_dfa;
mod syntax;
mod to_dfa;

pub use fragment::Fragment;
pub use syntax::{FollowposTable, Node, NodeId, NodeKind, SyntaxTree, END_MARKER, MAX_NESTING_DEPTH};
