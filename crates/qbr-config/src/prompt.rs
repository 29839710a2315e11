//! Prompt abstraction for interactive settings acquisition.

use std::io::{self, BufRead, Write};

/// Source of answers for settings not supplied via flags or environment.
///
/// The pipeline is driven entirely by a resolved [`crate::RunSettings`]; only
/// implementations of this trait ever read from a terminal.
pub trait SettingsPrompt {
    /// Ask one question and return the raw answer line.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Interactive prompt reading from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl SettingsPrompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question} ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}
