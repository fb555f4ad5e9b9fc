use std::io::{BufRead, Write};

use tagiron::{is_cancel, Hand, Positions, HAND_SIZE};
use tracing::trace;

use crate::{clear_screen, Config};

/// The input ended, e.g. because stdin was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfInput;

impl std::error::Error for EndOfInput {}

impl std::fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Input ended")
    }
}

/// Line-based prompts.
///
/// Every `input_*` method keeps asking until the input is valid, and returns `None`
/// when the player types [`CANCEL_INPUT`](tagiron::CANCEL_INPUT).
pub struct Prompter<R, W> {
    input: R,
    output: W,
    // A re-usable buffer for reading lines.
    buf: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: String::new(),
        }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `message` and reads one line, trimmed.
    ///
    /// Fails with [`EndOfInput`] when there is nothing left to read.
    pub fn read_line(&mut self, message: &str) -> anyhow::Result<String> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;
        self.buf.clear();
        let num_bytes_read = self.input.read_line(&mut self.buf)?;
        if num_bytes_read == 0 {
            return Err(EndOfInput.into());
        }
        let line = String::from(self.buf.trim());
        trace!(line = %line, "Read input");
        Ok(line)
    }

    /// An index in `0..len`.
    pub fn input_index(&mut self, message: &str, len: usize) -> anyhow::Result<Option<usize>> {
        loop {
            let line = self.read_line(message)?;
            if is_cancel(&line) {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(idx) if idx < len => return Ok(Some(idx)),
                _ => continue,
            }
        }
    }

    /// A non-negative number, as answered to count, sum and shared questions.
    pub fn input_number(&mut self, message: &str) -> anyhow::Result<Option<u8>> {
        loop {
            let line = self.read_line(message)?;
            if is_cancel(&line) {
                return Ok(None);
            }
            if let Ok(number) = line.parse::<u8>() {
                return Ok(Some(number));
            }
        }
    }

    /// Tile positions counted from 1, separated by spaces, or `none`.
    pub fn input_positions(&mut self, message: &str) -> anyhow::Result<Option<Positions>> {
        loop {
            let line = self.read_line(message)?;
            if is_cancel(&line) {
                return Ok(None);
            }
            if line == "none" {
                return Ok(Some(Positions::new()));
            }
            if line.is_empty() {
                continue;
            }
            if let Some(positions) = parse_positions(&line) {
                return Ok(Some(positions));
            }
        }
    }

    /// Asks for the player's hand until a valid one is confirmed.
    pub fn input_hand(&mut self, config: &Config) -> anyhow::Result<Hand> {
        let mut message = String::new();
        loop {
            if config.clear_screen {
                clear_screen(&mut self.output)?;
            }
            writeln!(
                self.output,
                "Example:\n    - `1r` for red 1\n    - `2b` for blue 2\n    - `5` for green 5"
            )?;
            if !message.is_empty() {
                writeln!(self.output, "!! {}", message)?;
            }
            let line = self.read_line("Input your hand:")?;
            let hand = match line.parse::<Hand>() {
                Ok(hand) => hand,
                Err(err) => {
                    message = format!("{}, please retry.", err);
                    continue;
                }
            };
            writeln!(self.output, "{}", hand)?;
            if self.confirm("Correct? (yes/no) [yes]")? {
                return Ok(hand);
            }
            message = String::from("Please retry.");
        }
    }

    /// `yes` or an empty line confirm, `no` declines. Anything else asks again.
    pub fn confirm(&mut self, message: &str) -> anyhow::Result<bool> {
        loop {
            match self.read_line(message)?.as_str() {
                "yes" | "" => return Ok(true),
                "no" => return Ok(false),
                _ => continue,
            }
        }
    }
}

// Converts 1-based positions to a set of 0-based ones.
fn parse_positions(line: &str) -> Option<Positions> {
    let slots = line
        .split_whitespace()
        .map(|word| match word.parse::<usize>() {
            Ok(position @ 1..=HAND_SIZE) => Some(position - 1),
            _ => None,
        })
        .collect::<Option<Vec<usize>>>()?;
    Positions::from_slots(slots).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn index_reprompts_until_in_range() {
        let mut p = prompter("x\n7\n2\n");
        assert_eq!(p.input_index("Which?", 3).unwrap(), Some(2));
        let output = String::from_utf8(p.output().clone()).unwrap();
        assert_eq!(output.matches("Which?").count(), 3);
    }

    #[test]
    fn cancel_and_end_of_input() {
        let mut p = prompter("exit\n");
        assert_eq!(p.input_number("Answer:").unwrap(), None);
        let err = p.input_number("Answer:").unwrap_err();
        assert!(err.is::<EndOfInput>());
    }

    #[test]
    fn positions_are_one_based() {
        let mut p = prompter("\n0 1\n2 5\n");
        let positions = p.input_positions("Answer:").unwrap().unwrap();
        assert_eq!(positions.iter().collect::<Vec<_>>(), vec![1, 4]);
        let mut p = prompter("none\n");
        assert!(p.input_positions("Answer:").unwrap().unwrap().is_empty());
    }

    #[test]
    fn hand_entry_retries_and_confirms() {
        let config = Config {
            lang: crate::Lang::En,
            clear_screen: false,
        };
        let mut p = prompter("1r 1r 2b 3b 4b\n9b 5 1r 7r 3b\nno\n1r 3b 5 7r 9b\n\n");
        let hand = p.input_hand(&config).unwrap();
        assert_eq!(hand.to_string(), "1r 3b 5 7r 9b");
        let output = String::from_utf8(p.output().clone()).unwrap();
        assert!(output.contains("appears more than once"));
        assert!(output.contains("Please retry."));
    }
}
