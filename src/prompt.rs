//! Operator interaction.
//! The question engine and task runner only talk to the operator through the
//! [`Prompter`] trait, so they can run against in-memory buffers in tests.

use crate::error::Result;
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Line-oriented operator interface.
pub trait Prompter {
    /// Prints a heading, such as a question message.
    fn title(&mut self, message: &str);

    /// Prints a plain line.
    fn print(&mut self, message: &str);

    /// Prints an error notice that does not stop the run.
    fn error(&mut self, message: &str);

    /// Shows `prompt` and blocks for one line of input, without its line
    /// terminator. `Ok(None)` means the input stream has ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompter over any reader and writer pair.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Gives back the writer, e.g. to inspect what a test printed.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) {
        // Output errors are ignored.
        let _ = writeln!(self.writer, "{line}");
    }
}

impl Console<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn title(&mut self, message: &str) {
        self.write_line(message);
    }

    fn print(&mut self, message: &str) {
        self.write_line(message);
    }

    fn error(&mut self, message: &str) {
        self.write_line(message);
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(Some(trimmed.to_string()))
    }
}

/// Terminal prompter; answers are read with dialoguer's line editor.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn title(&mut self, message: &str) {
        println!("{message}");
    }

    fn print(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(prompt.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer))
    }
}
