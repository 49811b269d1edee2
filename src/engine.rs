//! Primary engine interface: owns the active automaton generation.
//!
//! The engine follows a one-writer/many-readers discipline: a rule-set
//! update builds a complete new automaton off to the side, then
//! publishes it with a single swap of the shared `Arc`. Readers grab a
//! snapshot once per call (one brief read lock, never on the
//! per-character hot path) and keep matching against it even while a
//! newer generation is being built or published. An update either
//! fully replaces the active automaton or leaves it untouched.

use crate::aggregator::{aggregate, MatchResult};
use crate::automaton::{Automaton, AutomatonBuilder, AutomatonStats, State};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::event::Event;
use crate::matcher::scan;
use crate::orchestrator::{run_batch, run_batch_with_deadline};
use crate::rules::{preprocess, PreprocessReport, RawRule};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Content moderation matching engine.
///
/// # Examples
///
/// ```rust
/// use moderation_engine::{Event, ModerationEngine, RawRule};
///
/// let rules = vec![
///     RawRule::new("super", "mock", 5.0),
///     RawRule::new("man", "violence", 3.0),
/// ];
/// let engine = ModerationEngine::from_rules(&rules)?;
///
/// let event = Event::new("e1", "superman movie", "us", 0);
/// let result = engine.evaluate(&event)?;
/// assert_eq!(result.matched_rule_ids, vec![0, 1]);
/// assert_eq!(result.total_risk_score, 8.0);
/// # Ok::<(), moderation_engine::ModerationError>(())
/// ```
pub struct ModerationEngine {
    /// Active automaton generation; swapped atomically on reload.
    active: RwLock<Arc<Automaton>>,
    /// Next generation number to hand to a build.
    next_generation: AtomicU64,
    config: EngineConfig,
}

impl ModerationEngine {
    /// Create an engine with no rules loaded; generation 0 matches
    /// nothing.
    pub fn new(config: EngineConfig) -> Self {
        let empty = Automaton {
            states: vec![State::default()],
            rules: Vec::new(),
            generation: 0,
        };
        Self {
            active: RwLock::new(Arc::new(empty)),
            next_generation: AtomicU64::new(0),
            config,
        }
    }

    /// Create an engine from raw rules with the default configuration.
    ///
    /// Malformed rules are skipped (partial-success policy); callers
    /// that need the per-rule report should use [`Self::reload`].
    pub fn from_rules(rules: &[RawRule]) -> Result<Self> {
        Self::from_rules_with_config(rules, EngineConfig::default())
    }

    /// Create an engine from raw rules with an explicit configuration.
    pub fn from_rules_with_config(rules: &[RawRule], config: EngineConfig) -> Result<Self> {
        let engine = Self::new(config);
        engine.reload(rules)?;
        Ok(engine)
    }

    /// Compile a new rule list and atomically publish it.
    ///
    /// Preprocessing is partial-success: malformed rules land in the
    /// returned report and the rest compile. A build failure is
    /// all-or-nothing; the previous generation stays active and the
    /// error propagates. In-flight evaluations keep their snapshot
    /// either way.
    pub fn reload(&self, rules: &[RawRule]) -> Result<PreprocessReport> {
        let report = preprocess(rules);
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let automaton = AutomatonBuilder::new().build(report.rules.clone(), generation)?;

        let mut active = self.active.write().unwrap_or_else(|e| e.into_inner());
        // Concurrent reloads may finish out of order; never replace a
        // newer generation with an older one.
        if automaton.generation() > active.generation() {
            *active = Arc::new(automaton);
        }
        Ok(report)
    }

    /// Current automaton snapshot. The returned `Arc` stays valid (and
    /// immutable) across any number of concurrent reloads.
    pub fn snapshot(&self) -> Arc<Automaton> {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Generation number of the currently published automaton.
    pub fn generation(&self) -> u64 {
        self.snapshot().generation()
    }

    /// Construction statistics of the active automaton.
    pub fn stats(&self) -> AutomatonStats {
        self.snapshot().stats()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a single event against the active automaton.
    pub fn evaluate(&self, event: &Event) -> Result<MatchResult> {
        let automaton = self.snapshot();
        let matches = scan(&automaton, event, self.config.max_text_len)?;
        Ok(aggregate(&event.id, &matches, &automaton, &self.config))
    }

    /// Evaluate a batch of events; results preserve input order and
    /// per-event failures are error-marked instead of aborting.
    ///
    /// The whole batch runs against one snapshot: a reload in the
    /// middle of a batch never mixes rule generations.
    pub fn evaluate_batch(&self, events: &[Event]) -> Vec<MatchResult> {
        run_batch(&self.snapshot(), events, &self.config)
    }

    /// Evaluate a batch with a bound on how long the caller waits;
    /// events still outstanding at the deadline get an error marker.
    pub fn evaluate_batch_with_deadline(
        &self,
        events: Vec<Event>,
        timeout: Duration,
    ) -> Vec<MatchResult> {
        run_batch_with_deadline(self.snapshot(), events, &self.config, timeout)
    }
}
