//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_registry, display_status, display_success, format_registry,
};

/// Asks the operator for a version
pub trait Prompter: Send + Sync {
    /// Show `question` and return the answer, or `default` when the answer is empty
    fn prompt(&self, question: &str, default: &str) -> io::Result<String>;
}

/// Resolve the typed input against the suggested default.
///
/// Surrounding whitespace is ignored; empty input selects the default.
pub fn answer_or_default(input: &str, default: &str) -> String {
    match input.trim() {
        "" => default.to_string(),
        answer => answer.to_string(),
    }
}

/// Prompts on stdout and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, question: &str, default: &str) -> io::Result<String> {
        print!("{} [{}]: ", question, default);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(answer_or_default(&input, default))
    }
}

/// Replays prepared answers and records what was asked.
///
/// An empty answer selects the default, as on the terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    failure: Option<String>,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A prompter whose every prompt fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        ScriptedPrompter {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// `(question, default)` pairs in the order they were asked
    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked
            .lock()
            .map(|asked| asked.clone())
            .unwrap_or_default()
    }

    /// Number of answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, question: &str, default: &str) -> io::Result<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push((question.to_string(), default.to_string()));
        }
        if let Some(message) = &self.failure {
            return Err(io::Error::new(io::ErrorKind::Other, message.clone()));
        }

        let next = self
            .answers
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "scripted answers poisoned"))?
            .pop_front();
        match next {
            Some(answer) => Ok(answer_or_default(&answer, default)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer left for: {}", question),
            )),
        }
    }
}
