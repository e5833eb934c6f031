use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::{AppError, Result};

/// Line-oriented terminal the workflow talks to.
///
/// Generic over its streams so whole sessions can be scripted in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn println(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `prompt` without a newline and read the answer
    pub fn prompt(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Read one line with its terminator removed.
    ///
    /// End of input is [`AppError::InputClosed`]. Bytes that are not UTF-8
    /// become U+FFFD, so the line fails field rules instead of erroring.
    pub fn read_line(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(AppError::InputClosed);
        }
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
