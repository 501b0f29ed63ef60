//! Translate stage, optionally gated by the evaluate step.

use super::describe::Description;
use super::evaluate::Evaluator;
use super::metrics::StageMetrics;
use super::prompt;
use crate::llm::{ApiError, Completer};

/// Result of translating a batch.
#[derive(Debug, Clone, Default)]
pub struct TranslateOutcome {
    /// One entry per prompt; `None` where no candidate passed evaluation.
    pub results: Vec<Option<String>>,
    pub translation: StageMetrics,
    pub evaluation: StageMetrics,
}

pub struct Translator<'a, C> {
    client: &'a C,
    source_language: &'a str,
    target_language: &'a str,
    max_retries: u32,
    evaluate: bool,
}

impl<'a, C: Completer> Translator<'a, C> {
    pub const fn new(
        client: &'a C,
        source_language: &'a str,
        target_language: &'a str,
        max_retries: u32,
        evaluate: bool,
    ) -> Self {
        Self {
            client,
            source_language,
            target_language,
            max_retries,
            evaluate,
        }
    }

    /// Translates each prompt in order.
    ///
    /// `descriptions` is indexed like `prompts`. A prompt whose description
    /// could not be obtained is translated without context.
    pub async fn translate(
        &self,
        prompts: &[String],
        descriptions: Option<&[Option<Description>]>,
        mut on_progress: impl FnMut(usize),
    ) -> Result<TranslateOutcome, ApiError> {
        let mut outcome = TranslateOutcome::default();

        for (idx, query) in prompts.iter().enumerate() {
            on_progress(idx);

            let description = descriptions.and_then(|all| all.get(idx)).and_then(|d| {
                if d.is_none() {
                    tracing::warn!(
                        prompt = idx + 1,
                        "no description available, translating without context"
                    );
                }
                d.as_ref()
            });

            let translation = self
                .translate_one(
                    query,
                    description,
                    &mut outcome.translation,
                    &mut outcome.evaluation,
                )
                .await?;
            outcome.results.push(translation);
        }

        Ok(outcome)
    }

    /// Translates one text.
    ///
    /// Without evaluation the first response is accepted. With evaluation a
    /// candidate is kept only once it passes; each rejection counts as a
    /// translation retry.
    pub async fn translate_one(
        &self,
        query: &str,
        description: Option<&Description>,
        translation_metrics: &mut StageMetrics,
        evaluation_metrics: &mut StageMetrics,
    ) -> Result<Option<String>, ApiError> {
        let user_prompt =
            prompt::translate_prompt(self.source_language, self.target_language, query, description);

        if !self.evaluate {
            let completion = self
                .client
                .complete(prompt::TRANSLATE_SYSTEM_PROMPT, &user_prompt)
                .await?;
            translation_metrics.record(completion.usage);
            return Ok(Some(completion.text));
        }

        let evaluator = Evaluator::new(
            self.client,
            self.source_language,
            self.target_language,
            self.max_retries,
        );

        for attempt in 1..=self.max_retries {
            let completion = self
                .client
                .complete(prompt::TRANSLATE_SYSTEM_PROMPT, &user_prompt)
                .await?;
            translation_metrics.record(completion.usage);

            let evaluation = evaluator
                .evaluate(query, &completion.text, evaluation_metrics)
                .await?;

            if evaluation.is_some_and(|e| e.passed()) {
                return Ok(Some(completion.text));
            }

            translation_metrics.record_retry();
            tracing::warn!(
                "Attempt {attempt}/{} | translation failed evaluation, retrying...",
                self.max_retries
            );
        }

        Ok(None)
    }
}
