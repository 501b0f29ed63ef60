//! Parser for `<<Label>>: content` tagged model output.
//!
//! Each marker's content runs until the next marker or the end of the text.
//! Anything before the first marker is ignored, and a repeated label keeps
//! its last occurrence.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    // unwrap is safe: the pattern is a compile-time constant
    Regex::new(r"<<(\w+)>>:").unwrap()
});

/// Label to content map extracted from a response.
pub type Tags = BTreeMap<String, String>;

/// Extracts every labelled section from `text`, trimming whitespace.
pub fn parse_tags(text: &str) -> Tags {
    parse_with(text, str::trim)
}

/// Like [`parse_tags`], but also strips surrounding double quotes so that
/// `<<Accuracy>>: "yes"` reads as `yes`.
pub fn parse_evaluation_tags(text: &str) -> Tags {
    parse_with(text, |content| content.trim().trim_matches('"'))
}

/// Returns `true` if every label in `required` was parsed.
pub fn has_required(tags: &Tags, required: &[&str]) -> bool {
    required.iter().all(|label| tags.contains_key(*label))
}

fn parse_with(text: &str, clean: impl Fn(&str) -> &str) -> Tags {
    let markers: Vec<_> = MARKER.captures_iter(text).collect();
    let mut tags = Tags::new();

    for (idx, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = markers
            .get(idx + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |next| next.start());

        let content = clean(&text[whole.end()..end]);
        tags.insert(label.as_str().to_string(), content.to_string());
    }

    tags
}
