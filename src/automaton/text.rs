//! A small line based textual format for [`DFA`]s.
//!
//! ```text
//! alphabet: ab
//! initial: q0
//! final: q1
//! states: q0 q1 q2
//! q0 a q1
//! q1 b q2
//! ```
//!
//! The `alphabet:` line must come first. All other lines may appear in any order and any number of
//! times, states are created when they are mentioned for the first time. Empty lines and lines
//! starting with `//` are skipped. State names may not contain whitespace.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::{error::AutomatonError, prelude::*};

fn format_error(line: usize, reason: impl Into<String>) -> AutomatonError {
    AutomatonError::TextFormat {
        line,
        reason: reason.into(),
    }
}

/// Returns the id of the state named `name`, creating a rejecting state if necessary.
fn state_named(dfa: &mut DFA, name: &str) -> StateId {
    match dfa.id_of(name) {
        Some(id) => id,
        None => dfa.add_state(name.to_string(), false),
    }
}

impl FromStr for DFA {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"));

        let (line, header) = lines
            .next()
            .ok_or_else(|| format_error(1, "missing alphabet declaration"))?;
        let symbols = header
            .strip_prefix("alphabet:")
            .ok_or_else(|| format_error(line, "expected `alphabet:` as first declaration"))?;
        let alphabet = CharAlphabet::new(symbols.chars().filter(|c| !c.is_whitespace()))
            .map_err(|e| format_error(line, e.to_string()))?;
        let mut dfa = DFA::new(alphabet);

        for (line, content) in lines {
            if let Some(rest) = content.strip_prefix("initial:") {
                let name = rest
                    .split_whitespace()
                    .exactly_one()
                    .map_err(|_| format_error(line, "expected exactly one initial state"))?;
                let id = state_named(&mut dfa, name);
                dfa.set_initial_id(id);
            } else if let Some(rest) = content.strip_prefix("final:") {
                for name in rest.split_whitespace() {
                    let id = state_named(&mut dfa, name);
                    dfa.accepting.insert(id);
                }
            } else if let Some(rest) = content.strip_prefix("states:") {
                for name in rest.split_whitespace() {
                    state_named(&mut dfa, name);
                }
            } else if content.starts_with("alphabet:") {
                return Err(format_error(line, "the alphabet may only be declared once"));
            } else {
                let Some((source, symbol, target)) = content.split_whitespace().collect_tuple()
                else {
                    return Err(format_error(
                        line,
                        format!("expected a transition `source symbol target`, found \"{content}\""),
                    ));
                };
                let symbol = symbol
                    .chars()
                    .exactly_one()
                    .map_err(|_| format_error(line, format!("`{symbol}` is not a single symbol")))?;
                if !dfa.alphabet().contains(symbol) {
                    return Err(format_error(
                        line,
                        AutomatonError::UnknownSymbol(symbol).to_string(),
                    ));
                }
                let source = state_named(&mut dfa, source);
                let target = state_named(&mut dfa, target);
                if dfa.successor(source, symbol).is_some_and(|q| q != target) {
                    return Err(format_error(
                        line,
                        format!("conflicting transition on `{symbol}`, the automaton must be deterministic"),
                    ));
                }
                dfa.add_transition(source, symbol, target);
            }
        }

        Ok(dfa)
    }
}

impl Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "alphabet: {}", self.alphabet())?;
        if let Some(initial) = self.initial_state() {
            writeln!(f, "initial: {initial}")?;
        }
        if self.final_states().next().is_some() {
            writeln!(f, "final: {}", self.final_states().join(" "))?;
        }
        if !self.is_empty() {
            writeln!(f, "states: {}", self.state_names().join(" "))?;
        }
        for (source, symbol, target) in self.transitions() {
            writeln!(
                f,
                "{} {} {}",
                self.name_of(source).unwrap_or_default(),
                symbol,
                self.name_of(target).unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::AutomatonError, prelude::*, tests::wiki_dfa};

    #[test]
    fn textual_roundtrip() {
        let dfa = wiki_dfa();
        let text = dfa.to_string();
        assert!(text.starts_with("alphabet: ab\ninitial: 0\nfinal: 2 3 4\n"));
        let parsed: DFA = text.parse().unwrap();
        assert_eq!(parsed, dfa);
    }

    #[test]
    fn states_without_transitions() {
        let dfa: DFA = "// a single accepting state
                        alphabet: a

                        initial: only
                        final: only
                        states: lonely"
            .parse()
            .unwrap();
        assert_eq!(dfa.size(), 2);
        assert!(dfa.accepts(""));
        assert!(!dfa.accepts("a"));
        assert!(!dfa.is_final("lonely"));

        let empty: DFA = "alphabet:".parse().unwrap();
        assert!(empty.alphabet().is_empty());
        assert!(empty.is_empty());
        assert_eq!(empty.to_string(), "alphabet: \n");
    }

    #[test]
    fn malformed_descriptions() {
        assert!(matches!(
            "".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 1, .. })
        ));
        assert!(matches!(
            "initial: q\nalphabet: a".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 1, .. })
        ));
        assert!(matches!(
            "alphabet: a\nq a".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 2, .. })
        ));
        assert!(matches!(
            "alphabet: a\nq b p".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 2, .. })
        ));
        assert!(matches!(
            "alphabet: a\nq a p\nq a r".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 3, .. })
        ));
        assert!(matches!(
            "alphabet: a\ninitial: p q".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 2, .. })
        ));
    }

    #[test]
    fn symbols_outside_the_regex_grammar_are_rejected() {
        let err = "alphabet: a-\ninitial: p\nfinal: q\np - q"
            .parse::<DFA>()
            .unwrap_err();
        assert_eq!(
            err,
            AutomatonError::TextFormat {
                line: 1,
                reason: AutomatonError::InvalidSymbol('-').to_string()
            }
        );
        assert!(matches!(
            "// comment\nalphabet: #".parse::<DFA>(),
            Err(AutomatonError::TextFormat { line: 2, .. })
        ));
    }
}
