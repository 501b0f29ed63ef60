use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Splits input into prompts, one per non-blank line.
pub fn split_prompts(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

const SPLIT_HINT: &str = "Consider splitting the prompts into several runs.";

fn file_too_large(size: usize) -> anyhow::Error {
    anyhow::anyhow!(
        "Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n{SPLIT_HINT}",
        size as f64 / 1024.0 / 1024.0
    )
}

/// Streams are read only one byte past the limit, so their real size is
/// unknown here.
fn stream_too_large() -> anyhow::Error {
    anyhow::anyhow!("Input is more than 1 MB, the maximum allowed size.\n\n{SPLIT_HINT}")
}

/// Reads a whole stream as UTF-8, refusing anything over `MAX_INPUT_SIZE`.
fn read_capped(reader: impl Read) -> Result<String> {
    let mut buffer = Vec::new();
    reader
        .take(MAX_INPUT_SIZE as u64 + 1)
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    if buffer.len() > MAX_INPUT_SIZE {
        return Err(stream_too_large());
    }

    String::from_utf8(buffer).context("Input is not valid UTF-8")
}

pub struct InputReader;

impl InputReader {
    /// Collects the batch of prompts.
    ///
    /// Inline `texts` win; otherwise the file (or stdin when no file is
    /// given) is read and split into one prompt per non-blank line.
    pub fn read_prompts(file_path: Option<&Path>, texts: &[String]) -> Result<Vec<String>> {
        let prompts = if texts.is_empty() {
            split_prompts(&Self::read(file_path)?)
        } else {
            texts
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect()
        };

        if prompts.is_empty() {
            bail!("Input is empty");
        }
        Ok(prompts)
    }

    pub fn read(file_path: Option<&Path>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    fn read_file(path: &Path) -> Result<String> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            return Err(file_too_large(size));
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    fn read_stdin() -> Result<String> {
        read_capped(io::stdin().lock())
    }
}
