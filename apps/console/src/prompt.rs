//! Line-oriented prompting over any reader/writer pair.
//!
//! Invalid answers are reported and the same question is asked again;
//! only a closed input stream ends a prompt without a value.

use std::fmt::Display;
use std::io::{BufRead, Write};

use northwind_core::validation::{parse_yes_no, ValidationResult};
use tracing::debug;

use crate::error::{ShellError, ShellResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> ShellResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Writes `prompt` without a newline and reads one answer line.
    pub fn ask(&mut self, prompt: &str) -> ShellResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::end_of_input());
        }

        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(answer)
    }

    /// Asks until `parse` accepts the answer.
    pub fn ask_until<T, F>(&mut self, prompt: &str, parse: F) -> ShellResult<T>
    where
        F: Fn(&str) -> ValidationResult<T>,
    {
        loop {
            let answer = self.ask(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!(error = %err, "Rejected console input");
                    self.say(format_args!("  {err}"))?;
                }
            }
        }
    }

    /// Asks a Y/N question.
    pub fn confirm(&mut self, question: &str) -> ShellResult<bool> {
        self.ask_until(&format!("{question} (Y/N): "), parse_yes_no)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
