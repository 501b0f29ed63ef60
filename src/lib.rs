//! # artinya - describe, translate and evaluate with an LLM
//!
//! `artinya` translates a batch of texts through an OpenAI-compatible chat
//! completion endpoint in up to three steps per text:
//!
//! 1. **Describe** the style, tone, nuances, intent, cultural meaning and
//!    symbolism of the source text.
//! 2. **Translate** it, using that description as context.
//! 3. **Evaluate** the candidate on accuracy, clarity and style; a candidate
//!    needs two "yes" verdicts out of three or it is translated again.
//!
//! Token usage and retry counts are summed per stage and printed as a table.
//! Results land in a two-column CSV.
//!
//! ## Quick Start
//!
//! ```bash
//! # One text per line
//! artinya --to id prompts.txt
//!
//! # Inline texts, skipping the describe stage
//! artinya --to ja --no-describe -x "Good morning" -x "See you soon"
//!
//! # Keep descriptions and metrics for later
//! artinya --to id prompts.txt --report run.json
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/artinya/config.toml`:
//!
//! ```toml
//! [artinya]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! from = "en"
//! to = "id"
//! max_retries = 5
//!
//! [providers.local]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b"]
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files, stdin and inline texts.
pub mod input;

/// Language codes and their prompt names.
pub mod language;

/// Chat completion client for OpenAI-compatible APIs.
pub mod llm;

/// Global output configuration (quiet mode, log filtering).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// The describe/translate/evaluate pipeline.
pub mod pipeline;

/// CSV, JSON and table output of a run.
pub mod report;

/// Terminal UI components (spinner, colors).
pub mod ui;
