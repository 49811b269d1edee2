//! Single-pass event matching against a compiled automaton.
//!
//! One cursor walks the automaton while the event text streams through
//! the normalizer one code point at a time; no normalized copy of the
//! text is ever materialized and nothing is allocated proportional to
//! rule count. Validity filters (enabled, time window, region) are
//! applied at emission time, so time-bounded rules age in and out
//! without any rebuild of the automaton structure.

use crate::automaton::{Automaton, ROOT_STATE};
use crate::error::{ModerationError, Result};
use crate::event::Event;
use crate::normalize::NormalizedChars;

/// One raw match: a rule slot and the normalized-character index at
/// which its pattern ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch {
    /// Slot into the automaton's rule table.
    pub rule_slot: u32,
    /// Index (in normalized characters) of the match's last character.
    pub position: usize,
}

/// Scan one event and return every raw match that passes the validity
/// filters, including overlapping ones.
///
/// Cost is O(event length) amortized transitions plus O(matches)
/// emission; never O(event length × rule count). The automaton and
/// the event are both read-only here.
pub fn scan(
    automaton: &Automaton,
    event: &Event,
    max_text_len: Option<usize>,
) -> Result<Vec<RawMatch>> {
    if let Some(limit) = max_text_len {
        if event.text.len() > limit {
            return Err(ModerationError::EventTooLarge {
                len: event.text.len(),
                limit,
            });
        }
    }
    if event.text.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    let mut state = ROOT_STATE;
    for (position, c) in NormalizedChars::new(&event.text).enumerate() {
        state = automaton.step(state, c);
        for &rule_slot in automaton.outputs(state) {
            let rule = automaton.rule(rule_slot);
            if rule.is_live(&event.region, event.timestamp) {
                matches.push(RawMatch {
                    rule_slot,
                    position,
                });
            }
        }
    }
    Ok(matches)
}
