//! Core automaton types.
//!
//! An [`Automaton`] is the compiled, read-only form of one rule-set
//! generation: a trie over all normalized patterns with failure
//! transitions and merged output lists. It is built once per rule-set
//! version, shared behind an `Arc`, and never mutated by matching;
//! any number of worker threads may traverse it concurrently.

use crate::rules::Rule;
use std::collections::HashMap;

/// Index of a state in the automaton's state table.
pub type StateId = u32;

/// The root state; traversal falls back here when no transition exists.
pub const ROOT_STATE: StateId = 0;

/// One automaton state.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Direct transitions on a normalized character.
    pub transitions: HashMap<char, StateId>,
    /// Fallback state: the longest proper suffix of this state's path
    /// that is itself a prefix of some pattern.
    pub failure: StateId,
    /// Indices (into [`Automaton::rules`]) of every rule whose pattern
    /// ends at this state or at a state on its failure chain. Kept in
    /// ascending order; this ordering is part of the observable
    /// contract.
    pub output: Vec<u32>,
}

/// Compiled matcher for one rule-set generation.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// State table; index 0 is the root.
    pub(crate) states: Vec<State>,
    /// Compiled rules, in automaton slot order. Slot indices are what
    /// states' output lists refer to.
    pub(crate) rules: Vec<Rule>,
    /// Monotonically increasing rule-set version.
    pub(crate) generation: u64,
}

impl Automaton {
    /// Take one normalized character step from `from`, following
    /// failure links until a direct transition exists or the root is
    /// reached. Amortized O(1) across a scan.
    #[inline]
    pub fn step(&self, from: StateId, c: char) -> StateId {
        let mut state = from;
        loop {
            if let Some(&next) = self.states[state as usize].transitions.get(&c) {
                return next;
            }
            if state == ROOT_STATE {
                return ROOT_STATE;
            }
            state = self.states[state as usize].failure;
        }
    }

    /// Rule slots whose patterns end at `state` (directly or through
    /// the failure chain), ascending.
    #[inline]
    pub fn outputs(&self, state: StateId) -> &[u32] {
        &self.states[state as usize].output
    }

    /// Rule stored in the given automaton slot.
    #[inline]
    pub fn rule(&self, slot: u32) -> &Rule {
        &self.rules[slot as usize]
    }

    /// All compiled rules, slot order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule-set version this automaton was built from.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Construction statistics for capacity planning and tests.
    pub fn stats(&self) -> AutomatonStats {
        let transition_count = self.states.iter().map(|s| s.transitions.len()).sum();
        let output_entries = self.states.iter().map(|s| s.output.len()).sum();
        let total_pattern_len = self.rules.iter().map(|r| r.pattern.len()).sum();
        AutomatonStats {
            state_count: self.states.len(),
            transition_count,
            output_entries,
            rule_count: self.rules.len(),
            total_pattern_len,
            generation: self.generation,
        }
    }
}

/// Size statistics for one compiled automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonStats {
    /// Number of trie states including the root.
    pub state_count: usize,
    /// Total direct transitions across all states.
    pub transition_count: usize,
    /// Total entries across all merged output lists.
    pub output_entries: usize,
    /// Number of compiled rules.
    pub rule_count: usize,
    /// Sum of normalized pattern lengths, in characters.
    pub total_pattern_len: usize,
    /// Rule-set version.
    pub generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;
    use crate::rules::{preprocess, RawRule};

    fn build(patterns: &[&str]) -> Automaton {
        let raws: Vec<RawRule> = patterns
            .iter()
            .map(|p| RawRule::new(*p, "cat", 1.0))
            .collect();
        let report = preprocess(&raws);
        AutomatonBuilder::new().build(report.rules, 1).unwrap()
    }

    #[test]
    fn test_step_follows_transitions() {
        let automaton = build(&["ab"]);
        let s1 = automaton.step(ROOT_STATE, 'a');
        assert_ne!(s1, ROOT_STATE);
        let s2 = automaton.step(s1, 'b');
        assert_eq!(automaton.outputs(s2), &[0]);
    }

    #[test]
    fn test_step_falls_back_to_root() {
        let automaton = build(&["ab"]);
        let s1 = automaton.step(ROOT_STATE, 'a');
        // 'z' has no transition anywhere; traversal lands on the root
        assert_eq!(automaton.step(s1, 'z'), ROOT_STATE);
    }

    #[test]
    fn test_stats_counts() {
        let automaton = build(&["ab", "ac"]);
        let stats = automaton.stats();
        // root + a + ab + ac
        assert_eq!(stats.state_count, 4);
        assert_eq!(stats.rule_count, 2);
        assert_eq!(stats.total_pattern_len, 4);
        assert_eq!(stats.generation, 1);
    }
}
