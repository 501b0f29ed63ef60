//! Token and retry accounting for a batch run.

use serde::Serialize;

use crate::llm::TokenUsage;

/// Counters for one pipeline stage, summed over every prompt in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageMetrics {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub cached_tokens: u64,
    pub total_tokens: u64,
    pub retry_attempts: u64,
}

impl StageMetrics {
    /// Adds the usage of one completion call.
    pub const fn record(&mut self, usage: TokenUsage) {
        self.prompt_tokens += usage.prompt_tokens;
        self.completion_tokens += usage.completion_tokens;
        self.cached_tokens += usage.cached_tokens;
        self.total_tokens += usage.total_tokens;
    }

    pub const fn record_retry(&mut self) {
        self.retry_attempts += 1;
    }

    /// Retries per prompt. `None` for an empty batch.
    pub fn average_retry_attempts(&self, batch_size: usize) -> Option<f64> {
        (batch_size > 0).then(|| self.retry_attempts as f64 / batch_size as f64)
    }
}

/// Metrics of a whole run, one block per stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunMetrics {
    pub batch_size: usize,
    /// Absent when the describe stage was skipped.
    pub description: Option<StageMetrics>,
    pub translation: StageMetrics,
    pub evaluation: StageMetrics,
}

impl RunMetrics {
    /// Token total across every stage.
    pub fn total_tokens(&self) -> u64 {
        self.description.map_or(0, |d| d.total_tokens)
            + self.translation.total_tokens
            + self.evaluation.total_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(prompt: u64, completion: u64, cached: u64) -> TokenUsage {
        TokenUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
            cached_tokens: cached,
        }
    }

    #[test]
    fn test_record_sums_usage() {
        let mut metrics = StageMetrics::default();
        metrics.record(usage(100, 20, 0));
        metrics.record(usage(50, 5, 32));

        assert_eq!(metrics.prompt_tokens, 150);
        assert_eq!(metrics.completion_tokens, 25);
        assert_eq!(metrics.cached_tokens, 32);
        assert_eq!(metrics.total_tokens, 175);
        assert_eq!(metrics.retry_attempts, 0);
    }

    #[test]
    fn test_average_retry_attempts() {
        let mut metrics = StageMetrics::default();
        metrics.record_retry();
        metrics.record_retry();
        metrics.record_retry();

        assert_eq!(metrics.average_retry_attempts(2), Some(1.5));
        assert_eq!(metrics.average_retry_attempts(3), Some(1.0));
    }

    #[test]
    fn test_average_retry_attempts_empty_batch() {
        let metrics = StageMetrics::default();
        assert_eq!(metrics.average_retry_attempts(0), None);
    }

    #[test]
    fn test_run_total_tokens() {
        let mut run = RunMetrics {
            batch_size: 1,
            ..RunMetrics::default()
        };
        run.translation.record(usage(10, 5, 0));
        run.evaluation.record(usage(7, 1, 0));
        assert_eq!(run.total_tokens(), 23);

        let mut description = StageMetrics::default();
        description.record(usage(40, 10, 0));
        run.description = Some(description);
        assert_eq!(run.total_tokens(), 73);
    }
}
