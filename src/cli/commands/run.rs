//! Default command: describe, translate and evaluate a batch of texts.

use anyhow::Result;
use std::path::PathBuf;

use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::input::InputReader;
use crate::language::prompt_language;
use crate::llm::CompletionClient;
use crate::pipeline::{Pipeline, PipelineOptions, PipelineOutcome};
use crate::report::{RunReport, metrics_table, write_csv, write_json_report};
use crate::status;
use crate::ui::{Spinner, Style};

pub struct RunOptions {
    pub file: Option<PathBuf>,
    pub texts: Vec<String>,
    pub resolve: ResolveOptions,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let manager = ConfigManager::resolve(options.config.clone())?;
    let config_file = manager.load_or_default()?;
    let config = resolve_config(&options.resolve, &config_file)?;

    let prompts = InputReader::read_prompts(options.file.as_deref(), &options.texts)?;

    let pipeline_options = PipelineOptions {
        source_language: prompt_language(&config.source_language)?.to_string(),
        target_language: prompt_language(&config.target_language)?.to_string(),
        max_retries: config.max_retries,
        describe: config.describe,
        evaluate: config.evaluate,
    };

    let client = CompletionClient::new(
        config.endpoint.clone(),
        config.model.clone(),
        config.api_key.clone(),
    );

    status!(
        "{} {} {} {} {}",
        Style::header(format!("Translating {} text(s)", prompts.len())),
        Style::code(&config.source_language),
        Style::secondary("->"),
        Style::code(&config.target_language),
        Style::secondary(format!("({} via {})", config.model, config.provider_name)),
    );

    let outcome = run_pipeline(&client, pipeline_options, prompts).await?;

    if !crate::output::is_quiet() {
        println!("{}", metrics_table(&outcome.metrics));
    }

    write_outputs(&options, &config, &outcome)?;

    let missing = outcome.missing_translations();
    if missing > 0 {
        status!(
            "{} {missing} text(s) could not be translated within {} attempt(s); their rows are empty",
            Style::warning("!"),
            config.max_retries
        );
    }

    Ok(())
}

async fn run_pipeline(
    client: &CompletionClient,
    options: PipelineOptions,
    prompts: Vec<String>,
) -> Result<PipelineOutcome> {
    let pipeline = Pipeline::new(client, options);
    let spinner = Spinner::new("Starting...");

    let outcome = pipeline
        .run(prompts, |stage, idx, total| {
            spinner.set_message(format!("{} [{}/{total}]", stage.label(), idx + 1));
        })
        .await;

    spinner.stop();
    outcome
}

fn write_outputs(
    options: &RunOptions,
    config: &ResolvedConfig,
    outcome: &PipelineOutcome,
) -> Result<()> {
    write_csv(&options.output, outcome)?;
    status!(
        "{} Results saved to {}",
        Style::success("✓"),
        Style::secondary(options.output.display())
    );

    if let Some(path) = &options.report {
        let report = RunReport::new(
            &config.model,
            &config.source_language,
            &config.target_language,
            outcome,
        );
        write_json_report(path, &report)?;
        status!(
            "{} Report saved to {}",
            Style::success("✓"),
            Style::secondary(path.display())
        );
    }

    Ok(())
}
