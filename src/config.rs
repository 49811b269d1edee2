//! Engine configuration.
//!
//! Plain configuration structs with documented defaults. The engine
//! has no process boundary, so there is no file or environment layer;
//! callers construct a config and hand it to `ModerationEngine`.

/// Configuration for scoring, flagging, and batch execution.
///
/// # Examples
///
/// ```rust
/// use moderation_engine::EngineConfig;
///
/// // Production default
/// let config = EngineConfig::default();
///
/// // Custom flagging threshold, auto-flag override disabled
/// let strict = EngineConfig {
///     flag_threshold: 3.0,
///     honor_auto_flag: false,
///     ..EngineConfig::default()
/// };
/// # let _ = (config, strict);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Score at or above which an event is flagged.
    ///
    /// **Default**: 10.0
    pub flag_threshold: f64,

    /// Whether a matched rule with `auto_flag = true` flags the event
    /// even below the numeric threshold. Disabling this makes the
    /// threshold the sole flag trigger.
    ///
    /// **Default**: true
    pub honor_auto_flag: bool,

    /// Upper bound on event text size in bytes. Longer events fail
    /// with `EventTooLarge` instead of consuming unbounded match
    /// budget; `None` disables the check.
    ///
    /// **Default**: 1 MiB
    pub max_text_len: Option<usize>,

    /// Batch execution tuning.
    pub parallel: ParallelConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flag_threshold: 10.0,
            honor_auto_flag: true,
            max_text_len: Some(1 << 20),
            parallel: ParallelConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Configuration tuned for large-batch pipelines: parallel
    /// fan-out kicks in earlier.
    pub fn high_throughput() -> Self {
        Self {
            parallel: ParallelConfig {
                num_threads: rayon::current_num_threads(),
                min_batch_size_for_parallelism: 16,
            },
            ..Self::default()
        }
    }

    /// Convenience constructor overriding only the flag threshold.
    pub fn with_threshold(flag_threshold: f64) -> Self {
        Self {
            flag_threshold,
            ..Self::default()
        }
    }
}

/// Configuration for parallel batch evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Worker thread count the orchestrator assumes; matching runs on
    /// the global rayon pool.
    pub num_threads: usize,

    /// Batches smaller than this are evaluated sequentially; the
    /// fan-out overhead is not worth paying for a handful of events.
    pub min_batch_size_for_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
            min_batch_size_for_parallelism: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.flag_threshold, 10.0);
        assert!(config.honor_auto_flag);
        assert_eq!(config.max_text_len, Some(1 << 20));
        assert_eq!(config.parallel.min_batch_size_for_parallelism, 64);
        assert_eq!(config.parallel.num_threads, rayon::current_num_threads());
    }

    #[test]
    fn test_high_throughput_config() {
        let config = EngineConfig::high_throughput();
        assert_eq!(config.parallel.min_batch_size_for_parallelism, 16);
        assert_eq!(config.flag_threshold, 10.0);
    }

    #[test]
    fn test_with_threshold() {
        let config = EngineConfig::with_threshold(2.5);
        assert_eq!(config.flag_threshold, 2.5);
        assert!(config.honor_auto_flag);
    }
}
