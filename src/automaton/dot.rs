use itertools::Itertools;

use crate::{alphabet::Symbol, prelude::*};

fn sanitize_dot_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

impl DFA {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    /// Parallel transitions between two states are merged into a single edge whose label
    /// lists all symbols.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph A {".to_string(),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none]".to_string(),
        ];

        let states = self.state_ids().map(|q| {
            let name = self.name_of(q).unwrap_or_default();
            format!(
                "{} [shape={}]",
                sanitize_dot_ident(name),
                if self.is_accepting(q) {
                    "doublecircle"
                } else {
                    "circle"
                }
            )
        });

        let initial = self
            .initial_state()
            .map(|name| format!("init -> {}", sanitize_dot_ident(name)));

        let transitions = self
            .transitions()
            .map(|(source, symbol, target)| ((source, target), symbol))
            .into_group_map()
            .into_iter()
            .sorted()
            .map(|((source, target), symbols): ((StateId, StateId), Vec<Symbol>)| {
                format!(
                    "{} -> {} [label=\"{}\"]",
                    sanitize_dot_ident(self.name_of(source).unwrap_or_default()),
                    sanitize_dot_ident(self.name_of(target).unwrap_or_default()),
                    symbols.into_iter().join(", ")
                )
            });

        header
            .into_iter()
            .chain(states)
            .chain(initial)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::abb_dfa;

    #[test]
    fn dot_output() {
        let dot = abb_dfa().dot_representation();
        assert!(dot.starts_with("digraph A {"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("\"D\" [shape=doublecircle]"));
        assert!(dot.contains("init -> \"A\""));
        assert!(dot.contains("\"B\" -> \"B\" [label=\"a\"]"));
        // one arrow for the initial state, no two transitions share source and target
        assert_eq!(dot.matches("->").count(), 1 + 8);
    }
}
