use anyhow::Result;
use colored::Colorize;
use relay_agent::{run, AgentHandle, Exchange, InvocationRequest};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use tracing::debug;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    Skip,
    Query(String),
}

pub fn classify(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        Input::Skip
    } else if QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
        Input::Quit
    } else {
        Input::Query(line.to_string())
    }
}

/// Where the loop reads lines from. `None` means end of input.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads queries until a quit word or end of input, invoking the agent once
/// per query. Failed invocations are reported and the loop carries on; only
/// successful ones are added to the history passed to later calls.
pub async fn run_loop(
    handle: &dyn AgentHandle,
    source: &mut dyn LineSource,
    out: &mut dyn Write,
    prompt: &str,
) -> Result<Vec<Exchange>> {
    let mut history = Vec::new();

    while let Some(line) = source.read_line(prompt)? {
        let query = match classify(&line) {
            Input::Quit => break,
            Input::Skip => continue,
            Input::Query(query) => query,
        };

        let request = InvocationRequest::new(query).with_history(history.clone());
        match run(handle, &request).await {
            Ok(result) => {
                writeln!(out, "\n{}\n{}", "Response:".magenta().bold(), result.message)?;
                history.push(Exchange::new(request.query, result.message));
            }
            Err(e) => {
                writeln!(out, "\n{} {}", "Error:".red().bold(), e)?;
            }
        }
        debug!(history = history.len(), "Interactive turn finished");
    }

    Ok(history)
}
