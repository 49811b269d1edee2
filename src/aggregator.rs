//! Per-event reduction of raw matches into a [`MatchResult`].

use crate::automaton::Automaton;
use crate::config::EngineConfig;
use crate::error::ModerationError;
use crate::matcher::RawMatch;
use crate::rules::RuleId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Classification outcome for one event.
///
/// Output ordering is deterministic: `matched_rule_ids` ascends and
/// `categories` is lexicographic, so identical inputs always produce
/// byte-identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Identifier of the evaluated event.
    pub event_id: String,
    /// Distinct matched rule identifiers, ascending.
    pub matched_rule_ids: Vec<RuleId>,
    /// Distinct triggered categories, lexicographic.
    pub categories: Vec<String>,
    /// Sum of risk weights over distinct matched rules; repeated
    /// occurrences of one rule contribute once.
    pub total_risk_score: f64,
    /// Verdict: score met the threshold, or an auto-flag rule matched.
    pub flagged: bool,
    /// Per-event failure marker; when set, the other fields are empty
    /// defaults and the event needs operator attention.
    #[serde(default)]
    pub error: Option<String>,
}

impl MatchResult {
    /// Empty, unflagged result for an event nothing matched.
    pub fn empty(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            matched_rule_ids: Vec::new(),
            categories: Vec::new(),
            total_risk_score: 0.0,
            flagged: false,
            error: None,
        }
    }

    /// Error-marked result for an event that failed processing.
    pub fn failed(event_id: impl Into<String>, error: &ModerationError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(event_id)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Reduce one event's raw match list to its final result.
///
/// Deduplicates by rule identifier: a rule matching at ten positions
/// scores once, lists once, and triggers its category once.
pub fn aggregate(
    event_id: &str,
    matches: &[RawMatch],
    automaton: &Automaton,
    config: &EngineConfig,
) -> MatchResult {
    if matches.is_empty() {
        return MatchResult::empty(event_id);
    }

    // Distinct rules by reported id; BTreeMap gives ascending output
    // order for free. Duplicate patterns sharing an explicit id
    // collapse to one entry.
    let mut distinct: BTreeMap<RuleId, u32> = BTreeMap::new();
    for m in matches {
        distinct.entry(automaton.rule(m.rule_slot).id).or_insert(m.rule_slot);
    }

    let mut categories = BTreeSet::new();
    let mut total_risk_score = 0.0;
    let mut auto_flagged = false;
    for &slot in distinct.values() {
        let rule = automaton.rule(slot);
        categories.insert(rule.category.clone());
        total_risk_score += rule.risk_weight;
        auto_flagged |= rule.auto_flag;
    }

    let flagged =
        total_risk_score >= config.flag_threshold || (config.honor_auto_flag && auto_flagged);

    MatchResult {
        event_id: event_id.to_string(),
        matched_rule_ids: distinct.keys().copied().collect(),
        categories: categories.into_iter().collect(),
        total_risk_score,
        flagged,
        error: None,
    }
}
