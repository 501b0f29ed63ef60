use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

use crate::pipeline::{RunMetrics, StageMetrics};

/// Builds the per-stage token and retry table printed after a run.
pub fn metrics_table(metrics: &RunMetrics) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Metric").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    let stages = [
        ("Description", metrics.description),
        ("Translation", Some(metrics.translation)),
        ("Evaluation", Some(metrics.evaluation)),
    ];

    for (name, stage) in stages {
        if let Some(stage) = stage {
            add_stage_rows(&mut table, name, &stage, metrics.batch_size);
        }
    }

    table
}

fn add_stage_rows(table: &mut Table, name: &str, stage: &StageMetrics, batch_size: usize) {
    let average = stage
        .average_retry_attempts(batch_size)
        .map_or_else(|| "n/a".to_string(), |avg| format!("{avg:.2}"));

    let rows = [
        ("Completion Tokens", stage.completion_tokens.to_string()),
        ("Prompt Tokens", stage.prompt_tokens.to_string()),
        ("Cached Tokens", stage.cached_tokens.to_string()),
        ("Total Tokens", stage.total_tokens.to_string()),
        ("Total Retry Attempts", stage.retry_attempts.to_string()),
    ];

    for (label, value) in rows {
        table.add_row(vec![Cell::new(format!("{name} {label}")), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new(format!("Average {name} Retry Attempts")),
        Cell::new(average),
    ]);
}
