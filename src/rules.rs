//! Rule records and the preprocessing stage.
//!
//! Raw rule records arrive from the (out-of-scope) rule store as
//! [`RawRule`] values. Preprocessing validates and normalizes each
//! record into an immutable [`Rule`] without mutating the input, and
//! reports per-rule failures instead of aborting the whole set.

use crate::error::{ModerationError, Result, RuleError};
use crate::normalize::normalize_pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identifier a rule is reported under in match results.
pub type RuleId = u32;

/// Wire-facing rule record, exactly as produced by rule authoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRule {
    /// Text pattern to search for. Normalized during preprocessing
    /// with the same transform applied to event text.
    pub pattern: String,

    /// Category label used for aggregation.
    pub category: String,

    /// Non-negative score contribution when this rule matches.
    pub risk_weight: f64,

    /// Region identifiers this rule targets; empty means everywhere.
    #[serde(default)]
    pub regions: Vec<String>,

    /// Inclusive lower bound of the validity window (unix seconds).
    #[serde(default)]
    pub active_from: Option<i64>,

    /// Inclusive upper bound of the validity window (unix seconds).
    #[serde(default)]
    pub active_until: Option<i64>,

    /// Explicit on/off switch, independent of the time window.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// When true, a match flags the event regardless of the numeric
    /// threshold (subject to `EngineConfig::honor_auto_flag`).
    #[serde(default)]
    pub auto_flag: bool,

    /// Explicit identifier; defaults to the record's position in the
    /// input list when absent.
    #[serde(default)]
    pub id: Option<RuleId>,
}

fn default_enabled() -> bool {
    true
}

impl RawRule {
    /// Convenience constructor for the common always-on rule.
    pub fn new(pattern: impl Into<String>, category: impl Into<String>, risk_weight: f64) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
            risk_weight,
            regions: Vec::new(),
            active_from: None,
            active_until: None,
            enabled: true,
            auto_flag: false,
            id: None,
        }
    }
}

/// A validated, normalized rule as compiled into the automaton.
///
/// Immutable once built; changing any field of a live rule set
/// requires a rebuild through `ModerationEngine::reload`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Identifier reported in match results.
    pub id: RuleId,
    /// Normalized pattern, stored as code points for the trie builder.
    pub pattern: Vec<char>,
    /// Category label.
    pub category: String,
    /// Score contribution per matched rule (not per occurrence).
    pub risk_weight: f64,
    /// Targeted regions; empty set applies everywhere.
    pub regions: HashSet<String>,
    /// Validity window bounds, both inclusive.
    pub active_from: Option<i64>,
    pub active_until: Option<i64>,
    /// Explicit on/off switch.
    pub enabled: bool,
    /// Threshold-independent flag override.
    pub auto_flag: bool,
}

impl Rule {
    /// Validate and normalize one raw record.
    ///
    /// `default_id` is the record's position in the input list, used
    /// when the record carries no explicit identifier.
    pub fn compile(raw: &RawRule, default_id: RuleId) -> Result<Self> {
        if !raw.risk_weight.is_finite() || raw.risk_weight < 0.0 {
            return Err(ModerationError::InvalidRiskWeight(
                raw.risk_weight.to_string(),
            ));
        }
        if let (Some(from), Some(until)) = (raw.active_from, raw.active_until) {
            if from > until {
                return Err(ModerationError::InvalidTimeWindow { from, until });
            }
        }
        let pattern: Vec<char> = normalize_pattern(&raw.pattern).chars().collect();
        if pattern.is_empty() {
            return Err(ModerationError::EmptyPattern);
        }

        Ok(Self {
            id: raw.id.unwrap_or(default_id),
            pattern,
            category: raw.category.clone(),
            risk_weight: raw.risk_weight,
            regions: raw.regions.iter().cloned().collect(),
            active_from: raw.active_from,
            active_until: raw.active_until,
            enabled: raw.enabled,
            auto_flag: raw.auto_flag,
        })
    }

    /// True when the rule may match at all for the given event
    /// coordinates: enabled, inside its validity window, and targeting
    /// the event's region (or targeting everywhere).
    pub fn is_live(&self, region: &str, timestamp: i64) -> bool {
        if !self.enabled {
            return false;
        }
        if let Some(from) = self.active_from {
            if timestamp < from {
                return false;
            }
        }
        if let Some(until) = self.active_until {
            if timestamp > until {
                return false;
            }
        }
        self.regions.is_empty() || self.regions.contains(region)
    }
}

/// Outcome of preprocessing a rule list: the rules that compiled plus
/// a reason for every rule that did not.
///
/// A partial result is not an error; the caller decides whether to
/// proceed with a degraded rule set.
#[derive(Debug, Clone, Default)]
pub struct PreprocessReport {
    /// Successfully compiled rules, input order preserved.
    pub rules: Vec<Rule>,
    /// Per-rule failures, keyed by input position.
    pub errors: Vec<RuleError>,
}

impl PreprocessReport {
    /// True when every input record compiled.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn compiled_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.errors.len()
    }
}

/// Validate and normalize a full rule list.
///
/// Never mutates the input. A malformed rule is recorded in the report
/// and skipped; all other rules still compile.
pub fn preprocess(raw_rules: &[RawRule]) -> PreprocessReport {
    let mut report = PreprocessReport::default();
    for (index, raw) in raw_rules.iter().enumerate() {
        match Rule::compile(raw, index as RuleId) {
            Ok(rule) => report.rules.push(rule),
            Err(error) => report.errors.push(RuleError::new(index, error)),
        }
    }
    report
}

/// Parse a JSON array of raw rule records.
pub fn rules_from_json(json: &str) -> Result<Vec<RawRule>> {
    serde_json::from_str(json).map_err(|e| ModerationError::ParseError(e.to_string()))
}
