pub(crate) mod partition_refinement;

use tracing::warn;

use crate::prelude::*;

impl DFA {
    /// Computes the unique minimal DFA that accepts the same language as `self` by partition
    /// refinement in the style of Moore's algorithm.
    ///
    /// Unreachable states are dropped first, then the transition function is completed with an
    /// explicit dead state and the partition into accepting and rejecting states is refined until it
    /// is stable. The states of the result are named `0`, `1`, ... in breadth-first order from the
    /// initial state, so the initial state is always called `0`. The class of the dead state, which
    /// collects all states from which no accepting state can be reached, is not part of the result,
    /// hence the returned automaton may be partial.
    ///
    /// If `self` accepts the empty language, the result has no states and no initial state. The
    /// alphabet is always that of `self`.
    ///
    /// # Example
    /// ```
    /// use regular_automata::prelude::*;
    ///
    /// let dfa = DFA::from_regex("a*|aa*").unwrap();
    /// let minimal = dfa.minimize();
    /// assert_eq!(minimal.size(), 1);
    /// assert_eq!(minimal.initial_state(), Some("0"));
    /// assert!(minimal.is_final("0"));
    /// ```
    pub fn minimize(&self) -> DFA {
        if self.initial().is_none() {
            if !self.is_empty() {
                warn!(
                    "minimizing DFA with {} states but without initial state, its language is empty",
                    self.size()
                );
            }
            return DFA::new(self.alphabet().clone());
        }
        partition_refinement::moore_partition_refinement(self)
    }
}
