use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "artinya")]
#[command(about = "Describe, translate and evaluate text with an LLM")]
#[command(version)]
pub struct Args {
    /// File with one text per line (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Text to translate; may be repeated. Takes priority over the file
    #[arg(short = 'x', long = "text")]
    pub texts: Vec<String>,

    /// Source language code (ISO 639-1, e.g., en, id, ja)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (ISO 639-1, e.g., en, id, ja)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Provider name from the config file
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Attempts per stage before a prompt is given up on
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Run the describe stage even if the config file turns it off
    #[arg(long, overrides_with = "no_describe")]
    pub describe: bool,

    /// Skip the describe stage
    #[arg(long, overrides_with = "describe")]
    pub no_describe: bool,

    /// Evaluate translations even if the config file turns it off
    #[arg(long, overrides_with = "no_eval")]
    pub eval: bool,

    /// Accept the first translation without evaluating it
    #[arg(long, overrides_with = "eval")]
    pub no_eval: bool,

    /// CSV file to write results to
    #[arg(short = 'o', long, default_value = "results.csv")]
    pub output: PathBuf,

    /// Also write descriptions, translations and metrics as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Config file to use instead of ~/.config/artinya/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// Describe stage override; `None` defers to the config file.
    pub const fn describe_override(&self) -> Option<bool> {
        switch(self.describe, self.no_describe)
    }

    /// Evaluate step override; `None` defers to the config file.
    pub const fn eval_override(&self) -> Option<bool> {
        switch(self.eval, self.no_eval)
    }
}

const fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Edit default settings interactively
    Configure,
    /// List supported language codes
    Languages,
    /// List configured providers
    Providers {
        /// Show details for a single provider
        provider: Option<String>,
    },
}
