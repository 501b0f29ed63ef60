//! Scripted completion backend for stage tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::{Future, ready};
use std::sync::Mutex;

use crate::llm::{ApiError, Completer, Completion, TokenUsage};

pub const USAGE: TokenUsage = TokenUsage {
    prompt_tokens: 10,
    completion_tokens: 2,
    total_tokens: 12,
    cached_tokens: 4,
};

/// Replies with queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedCompleter {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedCompleter {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(system, user)` prompt pairs received so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

impl Completer for ScriptedCompleter {
    fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl Future<Output = Result<Completion, ApiError>> + Send {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let reply = self.replies.lock().unwrap().pop_front();
        ready(reply.map_or(Err(ApiError::EmptyResponse), |text| {
            Ok(Completion { text, usage: USAGE })
        }))
    }
}

pub const FULL_DESCRIPTION: &str = "\
<<Style>>: Casual.
<<Tone>>: Friendly.
<<Nuances>>: Light teasing.
<<Intent>>: Entertain.
<<CulturalMeaning>>: Internet slang.
<<Symbolism>>: None.";

pub const PARTIAL_DESCRIPTION: &str = "<<Style>>: Casual.\n<<Tone>>: Friendly.";

pub const EVAL_PASS: &str = "<<Accuracy>>: yes\n<<Clarity>>: yes\n<<StyleAndTone>>: no";

pub const EVAL_FAIL: &str = "<<Accuracy>>: no\n<<Clarity>>: yes\n<<StyleAndTone>>: no";

pub const EVAL_MALFORMED: &str = "<<Accuracy>>: yes";
