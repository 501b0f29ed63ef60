use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::fs::atomic_write;
use crate::pipeline::PipelineOutcome;

/// Retries per prompt for each stage.
#[derive(Debug, Serialize)]
pub struct AverageRetries {
    pub description: Option<f64>,
    pub translation: Option<f64>,
    pub evaluation: Option<f64>,
}

/// Full record of a run, written with `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub model: &'a str,
    pub source_language: &'a str,
    pub target_language: &'a str,
    #[serde(flatten)]
    pub outcome: &'a PipelineOutcome,
    pub average_retry_attempts: AverageRetries,
}

impl<'a> RunReport<'a> {
    pub fn new(
        model: &'a str,
        source_language: &'a str,
        target_language: &'a str,
        outcome: &'a PipelineOutcome,
    ) -> Self {
        let metrics = &outcome.metrics;
        let batch = metrics.batch_size;

        Self {
            model,
            source_language,
            target_language,
            outcome,
            average_retry_attempts: AverageRetries {
                description: metrics
                    .description
                    .and_then(|d| d.average_retry_attempts(batch)),
                translation: metrics.translation.average_retry_attempts(batch),
                evaluation: metrics.evaluation.average_retry_attempts(batch),
            },
        }
    }
}

pub fn write_json_report(path: &Path, report: &RunReport<'_>) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("Failed to serialize run report")?;
    atomic_write(path, &json)
        .with_context(|| format!("Failed to write report file: {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pipeline::{RunMetrics, StageMetrics};
    use tempfile::TempDir;

    fn outcome() -> PipelineOutcome {
        let mut translation = StageMetrics::default();
        translation.record_retry();

        PipelineOutcome {
            prompts: vec!["Hello".to_string(), "Bye".to_string()],
            descriptions: None,
            translations: vec![Some("Halo".to_string()), None],
            evaluated: true,
            metrics: RunMetrics {
                batch_size: 2,
                description: None,
                translation,
                evaluation: StageMetrics::default(),
            },
        }
    }

    #[test]
    fn test_report_json_shape() {
        let outcome = outcome();
        let report = RunReport::new("gpt-4o-mini", "English", "Indonesian", &outcome);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["prompts"][1], "Bye");
        assert_eq!(json["translations"][0], "Halo");
        assert!(json["translations"][1].is_null());
        assert!(json["descriptions"].is_null());
        assert_eq!(json["metrics"]["translation"]["retry_attempts"], 1);
        assert_eq!(json["average_retry_attempts"]["translation"], 0.5);
        assert!(json["average_retry_attempts"]["description"].is_null());
    }

    #[test]
    fn test_write_json_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");
        let outcome = outcome();
        let report = RunReport::new("m", "English", "Indonesian", &outcome);

        write_json_report(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["evaluated"], true);
    }
}
