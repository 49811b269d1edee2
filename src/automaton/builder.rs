//! Single-pass automaton construction (Aho-Corasick).
//!
//! Construction runs in three phases over the compiled rule list:
//! trie insertion, breadth-first failure-link computation, and output
//! chaining. Cost is O(total pattern length) in both time and space,
//! independent of how many events the automaton will later scan.

use crate::automaton::types::{Automaton, State, StateId, ROOT_STATE};
use crate::error::{ModerationError, Result};
use crate::rules::Rule;
use std::collections::VecDeque;

/// Builds an immutable [`Automaton`] from a finalized rule list.
///
/// The builder runs to completion before the automaton is published;
/// readers never observe a partially built generation.
#[derive(Debug)]
pub struct AutomatonBuilder {
    states: Vec<State>,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self {
            states: vec![State::default()],
        }
    }

    /// Build an automaton for one rule-set generation.
    ///
    /// Duplicate patterns are allowed; every owning rule slot is
    /// recorded at the shared terminal state. An empty rule list
    /// produces a valid automaton that matches nothing.
    pub fn build(mut self, rules: Vec<Rule>, generation: u64) -> Result<Automaton> {
        for (slot, rule) in rules.iter().enumerate() {
            self.insert_pattern(&rule.pattern, slot as u32)?;
        }
        self.link_failures();

        Ok(Automaton {
            states: self.states,
            rules,
            generation,
        })
    }

    /// Phase 1: extend the trie with one normalized pattern and record
    /// the owning rule slot at its terminal state.
    fn insert_pattern(&mut self, pattern: &[char], slot: u32) -> Result<()> {
        let mut state = ROOT_STATE;
        for &c in pattern {
            state = match self.states[state as usize].transitions.get(&c) {
                Some(&next) => next,
                None => {
                    let next = self.alloc_state()?;
                    self.states[state as usize].transitions.insert(c, next);
                    next
                }
            };
        }
        // Slots are inserted in ascending order, so each terminal's
        // own output list stays sorted without an extra pass.
        self.states[state as usize].output.push(slot);
        Ok(())
    }

    fn alloc_state(&mut self) -> Result<StateId> {
        let id = self.states.len();
        if id > StateId::MAX as usize {
            return Err(ModerationError::BuildError(format!(
                "state count exceeds {} states",
                StateId::MAX
            )));
        }
        self.states.push(State::default());
        Ok(id as StateId)
    }

    /// Phases 2 and 3: breadth-first failure links and output chaining.
    ///
    /// For a state at depth d reached from its parent on character c,
    /// the failure link is found by walking the parent's failure chain
    /// until a state with a transition on c appears, falling back to
    /// the root. Each state's effective output is its own terminals
    /// unioned with its failure state's output; since BFS processes
    /// the failure target first, one sorted merge per state suffices
    /// and transitively covers the whole failure chain. This chaining
    /// is what surfaces overlapping matches.
    fn link_failures(&mut self) {
        let mut queue = VecDeque::new();

        // Depth-1 states fail to the root.
        let first: Vec<StateId> = self.states[ROOT_STATE as usize]
            .transitions
            .values()
            .copied()
            .collect();
        for state in first {
            self.states[state as usize].failure = ROOT_STATE;
            queue.push_back(state);
        }

        while let Some(state) = queue.pop_front() {
            let edges: Vec<(char, StateId)> = self.states[state as usize]
                .transitions
                .iter()
                .map(|(&c, &next)| (c, next))
                .collect();

            for (c, next) in edges {
                let mut fail = self.states[state as usize].failure;
                loop {
                    if let Some(&target) = self.states[fail as usize].transitions.get(&c) {
                        fail = target;
                        break;
                    }
                    if fail == ROOT_STATE {
                        break;
                    }
                    fail = self.states[fail as usize].failure;
                }
                self.states[next as usize].failure = fail;

                let inherited = self.states[fail as usize].output.clone();
                let own = &mut self.states[next as usize].output;
                if !inherited.is_empty() {
                    *own = merge_sorted(own, &inherited);
                }

                queue.push_back(next);
            }
        }
    }
}

/// Merge two ascending slot lists into one ascending, deduplicated list.
fn merge_sorted(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                merged.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&a[i..]);
    merged.extend_from_slice(&b[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::types::ROOT_STATE;
    use crate::rules::{preprocess, RawRule};

    fn build(patterns: &[&str]) -> Automaton {
        let raws: Vec<RawRule> = patterns
            .iter()
            .map(|p| RawRule::new(*p, "cat", 1.0))
            .collect();
        AutomatonBuilder::new()
            .build(preprocess(&raws).rules, 0)
            .unwrap()
    }

    fn walk(automaton: &Automaton, text: &str) -> StateId {
        text.chars()
            .fold(ROOT_STATE, |state, c| automaton.step(state, c))
    }

    #[test]
    fn test_empty_rule_list() {
        let automaton = build(&[]);
        assert_eq!(automaton.state_count(), 1);
        assert_eq!(automaton.rule_count(), 0);
        assert_eq!(automaton.step(ROOT_STATE, 'a'), ROOT_STATE);
    }

    #[test]
    fn test_trie_shares_prefixes() {
        let automaton = build(&["abc", "abd"]);
        // root + a + ab + abc + abd
        assert_eq!(automaton.state_count(), 5);
    }

    #[test]
    fn test_terminal_outputs() {
        let automaton = build(&["he", "she"]);
        assert_eq!(automaton.outputs(walk(&automaton, "he")), &[0]);
        // "she" ends with suffix "he": both slots surface
        assert_eq!(automaton.outputs(walk(&automaton, "she")), &[0, 1]);
    }

    #[test]
    fn test_failure_links_classic_set() {
        // The textbook {he, she, his, hers} construction
        let automaton = build(&["he", "she", "his", "hers"]);
        let mut matches = Vec::new();
        let mut state = ROOT_STATE;
        for c in "ushers".chars() {
            state = automaton.step(state, c);
            matches.extend_from_slice(automaton.outputs(state));
        }
        // "he" and "she" both end on the first 'e' (ascending slot
        // order), then "hers"
        assert_eq!(matches, vec![0, 1, 3]);
    }

    #[test]
    fn test_output_chaining_overlapping() {
        let automaton = build(&["super", "man", "superman"]);
        let mut seen = Vec::new();
        let mut state = ROOT_STATE;
        for c in "superman".chars() {
            state = automaton.step(state, c);
            seen.extend_from_slice(automaton.outputs(state));
        }
        assert!(seen.contains(&0));
        assert!(seen.contains(&1));
        assert!(seen.contains(&2));
    }

    #[test]
    fn test_nested_suffix_chain() {
        // "a" is a suffix of "ba" which is a suffix of "cba"; outputs
        // must propagate transitively through the failure chain.
        let automaton = build(&["a", "ba", "cba"]);
        assert_eq!(automaton.outputs(walk(&automaton, "cba")), &[0, 1, 2]);
    }

    #[test]
    fn test_duplicate_patterns_share_terminal() {
        let automaton = build(&["dup", "dup"]);
        assert_eq!(automaton.outputs(walk(&automaton, "dup")), &[0, 1]);
    }

    #[test]
    fn test_outputs_ascending_everywhere() {
        let automaton = build(&["hers", "he", "she", "h", "s"]);
        for state in 0..automaton.state_count() as StateId {
            let output = automaton.outputs(state);
            assert!(
                output.windows(2).all(|w| w[0] < w[1]),
                "state {state} output not strictly ascending: {output:?}"
            );
        }
    }

    #[test]
    fn test_generation_recorded() {
        let raws = vec![RawRule::new("x", "c", 1.0)];
        let automaton = AutomatonBuilder::new()
            .build(preprocess(&raws).rules, 17)
            .unwrap();
        assert_eq!(automaton.generation(), 17);
    }

    #[test]
    fn test_merge_sorted_dedups() {
        assert_eq!(merge_sorted(&[1, 3, 5], &[2, 3, 6]), vec![1, 2, 3, 5, 6]);
        assert_eq!(merge_sorted(&[], &[4]), vec![4]);
        assert_eq!(merge_sorted(&[4], &[]), vec![4]);
    }
}
