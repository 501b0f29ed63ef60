//! Describe stage: stylistic and cultural analysis of each source text.

use serde::Serialize;

use super::metrics::StageMetrics;
use super::prompt;
use super::tags::{Tags, has_required, parse_tags};
use crate::llm::{ApiError, Completer};

/// Labels a description response must carry to be accepted.
pub const DESCRIPTION_LABELS: [&str; 6] = [
    "Style",
    "Tone",
    "Nuances",
    "Intent",
    "CulturalMeaning",
    "Symbolism",
];

/// Structured analysis of one source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub style: String,
    pub tone: String,
    pub nuances: String,
    pub intent: String,
    pub cultural_meaning: String,
    pub symbolism: String,
}

impl Description {
    /// Builds a description from parsed tags, or `None` if any label is missing.
    pub fn from_tags(mut tags: Tags) -> Option<Self> {
        if !has_required(&tags, &DESCRIPTION_LABELS) {
            return None;
        }
        Some(Self {
            style: tags.remove("Style")?,
            tone: tags.remove("Tone")?,
            nuances: tags.remove("Nuances")?,
            intent: tags.remove("Intent")?,
            cultural_meaning: tags.remove("CulturalMeaning")?,
            symbolism: tags.remove("Symbolism")?,
        })
    }

    /// Renders the description as context for the translation prompt.
    pub fn to_context(&self) -> String {
        format!(
            "Style: {}\nTone: {}\nNuances: {}\nIntent: {}\nCultural Meaning: {}\nSymbolism: {}",
            self.style, self.tone, self.nuances, self.intent, self.cultural_meaning, self.symbolism
        )
    }
}

/// Result of describing a batch.
#[derive(Debug, Clone, Default)]
pub struct DescribeOutcome {
    /// One entry per prompt; `None` where every attempt came back incomplete.
    pub results: Vec<Option<Description>>,
    pub metrics: StageMetrics,
}

pub struct Describer<'a, C> {
    client: &'a C,
    source_language: &'a str,
    max_retries: u32,
}

impl<'a, C: Completer> Describer<'a, C> {
    pub const fn new(client: &'a C, source_language: &'a str, max_retries: u32) -> Self {
        Self {
            client,
            source_language,
            max_retries,
        }
    }

    /// Describes each prompt in order.
    pub async fn describe(
        &self,
        prompts: &[String],
        mut on_progress: impl FnMut(usize),
    ) -> Result<DescribeOutcome, ApiError> {
        let mut outcome = DescribeOutcome::default();

        for (idx, prompt) in prompts.iter().enumerate() {
            on_progress(idx);
            let description = self.describe_one(prompt, &mut outcome.metrics).await?;
            outcome.results.push(description);
        }

        Ok(outcome)
    }

    /// Requests a description until all labels are present or retries run out.
    pub async fn describe_one(
        &self,
        prompt: &str,
        metrics: &mut StageMetrics,
    ) -> Result<Option<Description>, ApiError> {
        let system_prompt = prompt::describe_system_prompt(self.source_language);
        let user_prompt = prompt::describe_prompt(self.source_language, prompt);

        for attempt in 1..=self.max_retries {
            let completion = self.client.complete(&system_prompt, &user_prompt).await?;
            metrics.record(completion.usage);

            if let Some(description) = Description::from_tags(parse_tags(&completion.text)) {
                return Ok(Some(description));
            }

            metrics.record_retry();
            tracing::warn!(
                "Attempt {attempt}/{} | description missing labels, retrying...",
                self.max_retries
            );
        }

        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{FULL_DESCRIPTION, PARTIAL_DESCRIPTION, ScriptedCompleter};

    #[test]
    fn test_from_tags_requires_every_label() {
        assert!(Description::from_tags(parse_tags(FULL_DESCRIPTION)).is_some());
        assert!(Description::from_tags(parse_tags(PARTIAL_DESCRIPTION)).is_none());
    }

    #[test]
    fn test_to_context_format() {
        let description = Description::from_tags(parse_tags(FULL_DESCRIPTION)).unwrap();
        assert_eq!(
            description.to_context(),
            "Style: Casual.\nTone: Friendly.\nNuances: Light teasing.\nIntent: Entertain.\n\
             Cultural Meaning: Internet slang.\nSymbolism: None."
        );
    }

    #[tokio::test]
    async fn test_describe_one_first_attempt() {
        let client = ScriptedCompleter::new([FULL_DESCRIPTION]);
        let describer = Describer::new(&client, "English", 5);
        let mut metrics = StageMetrics::default();

        let description = describer.describe_one("Hi", &mut metrics).await.unwrap();

        assert_eq!(description.unwrap().style, "Casual.");
        assert_eq!(metrics.retry_attempts, 0);
        assert_eq!(metrics.total_tokens, 12);

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("specific to `English`"));
        assert!(calls[0].1.ends_with("Query: Hi\n"));
    }

    #[tokio::test]
    async fn test_describe_one_retries_incomplete() {
        let client = ScriptedCompleter::new([PARTIAL_DESCRIPTION, "garbage", FULL_DESCRIPTION]);
        let describer = Describer::new(&client, "English", 5);
        let mut metrics = StageMetrics::default();

        let description = describer.describe_one("Hi", &mut metrics).await.unwrap();

        assert!(description.is_some());
        assert_eq!(metrics.retry_attempts, 2);
        assert_eq!(metrics.prompt_tokens, 30);
        assert_eq!(metrics.cached_tokens, 12);
    }

    #[tokio::test]
    async fn test_describe_one_exhausts_retries() {
        let client = ScriptedCompleter::new([PARTIAL_DESCRIPTION; 4]);
        let describer = Describer::new(&client, "English", 3);
        let mut metrics = StageMetrics::default();

        let description = describer.describe_one("Hi", &mut metrics).await.unwrap();

        assert!(description.is_none());
        assert_eq!(metrics.retry_attempts, 3);
        assert_eq!(client.calls().len(), 3);
        assert_eq!(client.remaining(), 1);
    }

    #[tokio::test]
    async fn test_describe_one_propagates_request_failure() {
        let client = ScriptedCompleter::new(Vec::<String>::new());
        let describer = Describer::new(&client, "English", 3);
        let mut metrics = StageMetrics::default();

        let result = describer.describe_one("Hi", &mut metrics).await;

        assert!(matches!(result, Err(ApiError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_describe_batch_accumulates() {
        let client = ScriptedCompleter::new([
            FULL_DESCRIPTION,
            PARTIAL_DESCRIPTION,
            PARTIAL_DESCRIPTION,
        ]);
        let describer = Describer::new(&client, "English", 2);
        let prompts = vec!["one".to_string(), "two".to_string()];
        let mut seen = Vec::new();

        let outcome = describer
            .describe(&prompts, |idx| seen.push(idx))
            .await
            .unwrap();

        assert_eq!(seen, vec![0, 1]);
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results[0].is_some());
        assert!(outcome.results[1].is_none());
        assert_eq!(outcome.metrics.retry_attempts, 2);
        assert_eq!(outcome.metrics.total_tokens, 36);
        assert_eq!(outcome.metrics.average_retry_attempts(prompts.len()), Some(1.0));
    }
}
