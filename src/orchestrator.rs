//! Batch orchestration: fan events out across workers, collect
//! results in input order.
//!
//! Every event's match-and-aggregate path is independent and the
//! automaton snapshot is read-only, so batches parallelize with no
//! coordination beyond reassembling the output. Per-event failures
//! become error-marked results; a batch never aborts.

use crate::aggregator::{aggregate, MatchResult};
use crate::automaton::Automaton;
use crate::config::EngineConfig;
use crate::error::ModerationError;
use crate::event::Event;
use crate::matcher::scan;
use rayon::prelude::*;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Match and aggregate one event, converting any failure into an
/// error-marked result.
pub(crate) fn process_event(
    automaton: &Automaton,
    event: &Event,
    config: &EngineConfig,
) -> MatchResult {
    match scan(automaton, event, config.max_text_len) {
        Ok(matches) => aggregate(&event.id, &matches, automaton, config),
        Err(error) => MatchResult::failed(event.id.clone(), &error),
    }
}

/// Evaluate a batch against one automaton snapshot.
///
/// Results come back in input order regardless of internal
/// parallelism. Small batches run sequentially; above the configured
/// threshold the batch fans out over the rayon pool.
pub fn run_batch(
    automaton: &Automaton,
    events: &[Event],
    config: &EngineConfig,
) -> Vec<MatchResult> {
    let parallel = events.len() >= config.parallel.min_batch_size_for_parallelism
        && config.parallel.num_threads > 1;
    if parallel {
        // Indexed parallel iteration preserves input order on collect.
        events
            .par_iter()
            .map(|event| process_event(automaton, event, config))
            .collect()
    } else {
        events
            .iter()
            .map(|event| process_event(automaton, event, config))
            .collect()
    }
}

/// Evaluate a batch, bounding how long the caller waits.
///
/// Work is spawned per event; results arriving before the deadline are
/// placed at their input positions, and events still outstanding when
/// the deadline passes get a `DeadlineExceeded` marker. Shared state
/// is never mutated; stragglers finish against the same snapshot and
/// their results are simply dropped.
pub fn run_batch_with_deadline(
    automaton: Arc<Automaton>,
    events: Vec<Event>,
    config: &EngineConfig,
    timeout: Duration,
) -> Vec<MatchResult> {
    let deadline = Instant::now() + timeout;
    let event_ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
    let events = Arc::new(events);
    let config = Arc::new(config.clone());

    let (tx, rx) = mpsc::channel();
    for index in 0..events.len() {
        let tx = tx.clone();
        let automaton = Arc::clone(&automaton);
        let events = Arc::clone(&events);
        let config = Arc::clone(&config);
        rayon::spawn(move || {
            let result = process_event(&automaton, &events[index], &config);
            // Receiver may already have given up; that is fine.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let mut slots: Vec<Option<MatchResult>> = vec![None; events.len()];
    let mut outstanding = events.len();
    while outstanding > 0 {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        match rx.recv_timeout(deadline - now) {
            Ok((index, result)) => {
                slots[index] = Some(result);
                outstanding -= 1;
            }
            Err(_) => break,
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                MatchResult::failed(event_ids[index].clone(), &ModerationError::DeadlineExceeded)
            })
        })
        .collect()
}
