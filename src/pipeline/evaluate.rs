//! Evaluate step: yes/no verdicts on a candidate translation.

use serde::Serialize;

use super::metrics::StageMetrics;
use super::prompt;
use super::tags::{Tags, has_required, parse_evaluation_tags};
use crate::llm::{ApiError, Completer};

pub const EVALUATION_LABELS: [&str; 3] = ["Accuracy", "Clarity", "StyleAndTone"];

/// Verdicts needed for a translation to be accepted.
pub const PASSING_SCORE: usize = 2;

/// Pass/fail judgment of a translation along three axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub accuracy: bool,
    pub clarity: bool,
    pub style_and_tone: bool,
}

impl Evaluation {
    /// Scores parsed tags, or `None` if any label is missing.
    pub fn from_tags(tags: &Tags) -> Option<Self> {
        if !has_required(tags, &EVALUATION_LABELS) {
            return None;
        }
        Some(Self {
            accuracy: is_yes(&tags["Accuracy"]),
            clarity: is_yes(&tags["Clarity"]),
            style_and_tone: is_yes(&tags["StyleAndTone"]),
        })
    }

    pub fn score(&self) -> usize {
        [self.accuracy, self.clarity, self.style_and_tone]
            .into_iter()
            .filter(|verdict| *verdict)
            .count()
    }

    pub fn passed(&self) -> bool {
        self.score() >= PASSING_SCORE
    }
}

/// Reads a verdict, ignoring case, quotes, line breaks and list dashes.
fn is_yes(content: &str) -> bool {
    let normalized: String = content
        .chars()
        .filter(|c| !matches!(c, '\n' | '-' | '"'))
        .collect();
    normalized.trim().eq_ignore_ascii_case("yes")
}

pub struct Evaluator<'a, C> {
    client: &'a C,
    source_language: &'a str,
    target_language: &'a str,
    max_retries: u32,
}

impl<'a, C: Completer> Evaluator<'a, C> {
    pub const fn new(
        client: &'a C,
        source_language: &'a str,
        target_language: &'a str,
        max_retries: u32,
    ) -> Self {
        Self {
            client,
            source_language,
            target_language,
            max_retries,
        }
    }

    /// Asks for verdicts until all three labels are present.
    ///
    /// Returns `None` once retries run out; callers treat that as a failed
    /// evaluation.
    pub async fn evaluate(
        &self,
        query: &str,
        translation: &str,
        metrics: &mut StageMetrics,
    ) -> Result<Option<Evaluation>, ApiError> {
        let user_prompt =
            prompt::evaluate_prompt(self.source_language, self.target_language, query, translation);

        for attempt in 1..=self.max_retries {
            let completion = self
                .client
                .complete(prompt::EVALUATE_SYSTEM_PROMPT, &user_prompt)
                .await?;
            metrics.record(completion.usage);

            let tags = parse_evaluation_tags(&completion.text);
            if let Some(evaluation) = Evaluation::from_tags(&tags) {
                tracing::debug!(score = evaluation.score(), "translation evaluated");
                return Ok(Some(evaluation));
            }

            metrics.record_retry();
            tracing::warn!(
                "Attempt {attempt}/{} | evaluation missing labels, retrying...",
                self.max_retries
            );
        }

        Ok(None)
    }
}
