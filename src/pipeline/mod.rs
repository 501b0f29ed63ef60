//! Describe → translate → evaluate pipeline.
//!
//! Every stage runs sequentially over the batch. Token and retry counters are
//! returned as values from each stage and folded into [`RunMetrics`].

mod describe;
mod evaluate;
mod metrics;
pub mod prompt;
pub mod tags;
mod translate;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::llm::Completer;

pub use describe::{DESCRIPTION_LABELS, DescribeOutcome, Describer, Description};
pub use evaluate::{EVALUATION_LABELS, Evaluation, Evaluator, PASSING_SCORE};
pub use metrics::{RunMetrics, StageMetrics};
pub use translate::{TranslateOutcome, Translator};

pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Which stage a progress callback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Describing,
    Translating,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Describing => "Describing",
            Self::Translating => "Translating",
        }
    }
}

/// Settings for one pipeline run. Languages are display names, not codes.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub source_language: String,
    pub target_language: String,
    pub max_retries: u32,
    pub describe: bool,
    pub evaluate: bool,
}

/// Everything a run produced, indexed like the input prompts.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub prompts: Vec<String>,
    /// Absent when the describe stage was skipped.
    pub descriptions: Option<Vec<Option<Description>>>,
    pub translations: Vec<Option<String>>,
    pub evaluated: bool,
    pub metrics: RunMetrics,
}

impl PipelineOutcome {
    /// `(original, translation)` pairs; a missing translation reads as `""`.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prompts
            .iter()
            .zip(&self.translations)
            .map(|(prompt, translation)| (prompt.as_str(), translation.as_deref().unwrap_or("")))
    }

    /// Number of prompts that ended without a translation.
    pub fn missing_translations(&self) -> usize {
        self.translations.iter().filter(|t| t.is_none()).count()
    }
}

pub struct Pipeline<'a, C> {
    client: &'a C,
    options: PipelineOptions,
}

impl<'a, C: Completer> Pipeline<'a, C> {
    pub const fn new(client: &'a C, options: PipelineOptions) -> Self {
        Self { client, options }
    }

    /// Runs the batch. `on_progress` receives the stage, the zero-based
    /// prompt index and the batch size before each prompt is processed.
    ///
    /// A failed request aborts the whole run.
    pub async fn run(
        &self,
        prompts: Vec<String>,
        mut on_progress: impl FnMut(Stage, usize, usize),
    ) -> Result<PipelineOutcome> {
        if prompts.is_empty() {
            bail!("No prompts to translate");
        }
        if self.options.max_retries == 0 {
            bail!("max_retries must be at least 1");
        }

        let options = &self.options;
        let total = prompts.len();

        let description_outcome = if options.describe {
            let describer = Describer::new(self.client, &options.source_language, options.max_retries);
            let outcome = describer
                .describe(&prompts, |idx| on_progress(Stage::Describing, idx, total))
                .await?;
            Some(outcome)
        } else {
            None
        };

        let translator = Translator::new(
            self.client,
            &options.source_language,
            &options.target_language,
            options.max_retries,
            options.evaluate,
        );
        let translate_outcome = translator
            .translate(
                &prompts,
                description_outcome.as_ref().map(|d| d.results.as_slice()),
                |idx| on_progress(Stage::Translating, idx, total),
            )
            .await?;

        let metrics = RunMetrics {
            batch_size: total,
            description: description_outcome.as_ref().map(|d| d.metrics),
            translation: translate_outcome.translation,
            evaluation: translate_outcome.evaluation,
        };

        tracing::debug!(
            prompts = total,
            total_tokens = metrics.total_tokens(),
            "pipeline finished"
        );

        Ok(PipelineOutcome {
            prompts,
            descriptions: description_outcome.map(|d| d.results),
            translations: translate_outcome.results,
            evaluated: options.evaluate,
            metrics,
        })
    }
}
