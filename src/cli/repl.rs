//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop: read lines with rustyline, accumulate them in a
//! statement buffer, and dispatch to the evaluator once the accumulated
//! text forms a complete SQL statement.
//!
//! ## Input Handling
//!
//! Statements may span multiple lines. The prompt switches from `sq3>` to
//! `  ->` while a statement is still accumulating. Completeness is decided
//! by SQLite's own `sqlite3_complete()`, so semicolons inside string
//! literals or comments do not end a statement.
//!
//! ## Error Handling
//!
//! SQL errors are displayed and do not terminate the loop; the buffer is
//! reset after every dispatch regardless of outcome. Ctrl+C discards the
//! pending buffer, Ctrl+D exits.

use crate::cli::complete::is_complete;
use crate::cli::eval::Evaluator;
use crate::cli::history::history_path;
use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};

const PRIMARY_PROMPT: &str = "sq3> ";
const CONTINUATION_PROMPT: &str = "  -> ";

/// Accumulates raw input lines until they form one complete SQL statement.
///
/// Lines are joined by plain concatenation, exactly as read. The buffer is
/// owned solely by the REPL loop and resets after every dispatch, so a
/// failed statement never poisons later input.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    pending: String,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append one raw line. Returns the trimmed statement once the
    /// completeness oracle accepts the accumulated text, leaving the buffer
    /// empty; returns None while the text is still incomplete.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        self.pending.push_str(line);
        if !is_complete(&self.pending) {
            return None;
        }
        let sql = std::mem::take(&mut self.pending);
        Some(sql.trim().to_string())
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

pub struct Repl {
    evaluator: Evaluator,
    editor: DefaultEditor,
    buffer: StatementBuffer,
}

impl Repl {
    pub fn new(evaluator: Evaluator) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            evaluator,
            editor,
            buffer: StatementBuffer::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let prompt = if self.buffer.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) => self.handle_line(&line)?,
                Err(ReadlineError::Interrupted) => {
                    self.buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<()> {
        let Some(sql) = self.buffer.push_line(line) else {
            return Ok(());
        };
        self.editor.add_history_entry(&sql).ok();

        let mut out = io::stdout().lock();
        // outcome ignored: interactive mode survives failed statements
        self.evaluator.eval(&sql, &mut out)?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for Repl {
    // History persists on every exit path, including errors unwinding out
    // of the loop.
    fn drop(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                eprintln!("Warning: could not save history: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_statement_dispatches_and_resets() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select 1;"), Some("select 1;".to_string()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn multi_line_statement_accumulates_until_complete() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select 1 as a, "), None);
        assert!(!buffer.is_empty());
        assert_eq!(
            buffer.push_line("2 as b;"),
            Some("select 1 as a, 2 as b;".to_string())
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn dispatched_statement_is_trimmed() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(
            buffer.push_line("  select 1;  "),
            Some("select 1;".to_string())
        );
    }

    #[test]
    fn quoted_semicolon_keeps_accumulating() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select ';"), None);
        assert_eq!(buffer.push_line("';"), Some("select ';';".to_string()));
    }

    #[test]
    fn clear_discards_pending_text() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push_line("select 1"), None);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.push_line("select 2;"), Some("select 2;".to_string()));
    }
}
