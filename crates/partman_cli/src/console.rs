//! Line-oriented terminal input.

use std::io::{self, Write};
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Answer that clears a field in `prompt_with_default`.
pub const CLEAR_FIELD: &str = "-";

/// Reads prompted lines from stdin.
pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Prints `label` and reads one line. Returns `None` at end of input.
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        self.lines.next_line().await
    }

    /// Prints `label` and reads one line without echoing it.
    ///
    /// Returns `None` at end of input.
    pub async fn prompt_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        let read = tokio::task::spawn_blocking(rpassword::read_password)
            .await
            .map_err(io::Error::other)?;
        match read {
            Ok(secret) => Ok(Some(secret)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Like `prompt`, but an empty answer keeps `current` and `-` clears it.
    pub async fn prompt_with_default(
        &mut self,
        label: &str,
        current: &str,
    ) -> io::Result<Option<String>> {
        let answer = self
            .prompt(&format!("{label} [{current}] ({CLEAR_FIELD} to clear): "))
            .await?;
        Ok(answer.map(|value| resolve_answer(value, current)))
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_answer(answer: String, current: &str) -> String {
    if answer.is_empty() {
        current.to_string()
    } else if answer == CLEAR_FIELD {
        String::new()
    } else {
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_answer, CLEAR_FIELD};

    #[test]
    fn empty_answer_keeps_current_value() {
        assert_eq!(resolve_answer(String::new(), "Bin 3"), "Bin 3");
    }

    #[test]
    fn clear_marker_empties_the_field() {
        assert_eq!(resolve_answer(CLEAR_FIELD.to_string(), "fastener, metal"), "");
    }

    #[test]
    fn other_answers_replace_current_value() {
        assert_eq!(resolve_answer("Bin 7".to_string(), "Bin 3"), "Bin 7");
        assert_eq!(resolve_answer("-5".to_string(), "120"), "-5");
    }
}
