//! # Moderation Engine
//!
//! A high-throughput multi-pattern content-matching engine. Tens of
//! thousands of detection rules (pattern, category, risk weight,
//! region targeting, validity window) compile once into a single
//! automaton with failure and output links; each event is then
//! classified in one linear pass whose cost depends on the event's
//! length, not the rule count, while still reporting overlapping
//! matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use moderation_engine::{Event, ModerationEngine, RawRule};
//!
//! let rules = vec![
//!     RawRule::new("super", "mock", 5.0),
//!     RawRule::new("man", "violence", 3.0),
//! ];
//! let engine = ModerationEngine::from_rules(&rules)?;
//!
//! let event = Event::new("event-1", "superman movie", "us", 1_700_000_000);
//! let result = engine.evaluate(&event)?;
//! assert_eq!(result.matched_rule_ids, vec![0, 1]);
//! assert_eq!(result.categories, vec!["mock", "violence"]);
//! assert_eq!(result.total_risk_score, 8.0);
//! # Ok::<(), moderation_engine::ModerationError>(())
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use moderation_engine::{Event, ModerationEngine, RawRule};
//!
//! let engine = ModerationEngine::from_rules(&[RawRule::new("spam", "spam", 1.0)])?;
//!
//! let events = vec![
//!     Event::new("a", "buy spam here", "us", 0),
//!     Event::new("b", "all clear", "us", 0),
//! ];
//! let results = engine.evaluate_batch(&events);
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].matched_rule_ids, vec![0]);
//! assert!(results[1].matched_rule_ids.is_empty());
//! # Ok::<(), moderation_engine::ModerationError>(())
//! ```
//!
//! ## Rule Updates
//!
//! Rule sets are immutable once compiled. `ModerationEngine::reload`
//! builds a complete new automaton generation and publishes it with a
//! single atomic swap; in-flight evaluations keep matching against
//! the snapshot they started with and never observe a half-built or
//! mixed rule set.

pub mod aggregator;
pub mod automaton;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod matcher;
pub mod normalize;
pub mod orchestrator;
pub mod rules;

pub use aggregator::{aggregate, MatchResult};
pub use automaton::{Automaton, AutomatonBuilder, AutomatonStats};
pub use config::{EngineConfig, ParallelConfig};
pub use engine::ModerationEngine;
pub use error::{ModerationError, Result, RuleError};
pub use event::Event;
pub use matcher::{scan, RawMatch};
pub use orchestrator::{run_batch, run_batch_with_deadline};
pub use rules::{preprocess, rules_from_json, PreprocessReport, RawRule, Rule, RuleId};
