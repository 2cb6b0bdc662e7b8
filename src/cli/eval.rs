//! # Statement Evaluator
//!
//! Executes one complete SQL statement against the connection and decides
//! whether to render a result set.
//!
//! ## Execution Flow
//!
//! ```text
//! statement ──► "commit"? ──yes──► commit the open transaction
//!      │ no
//!      ▼
//!   prepare ──► leading keyword select/pragma? ──yes──► query ──► Renderer
//!      │ no
//!      ▼
//!   step once (DDL, DML; RETURNING rows are not rendered)
//! ```
//!
//! ## Error Handling
//!
//! Engine-level failures (malformed SQL, constraint violations, missing
//! tables) are converted to a printed diagnostic carrying the offending
//! statement text, and `eval` returns `Ok(false)`. They never escape as
//! errors, so the interactive loop survives them; batch runs stop at the
//! first `false`. Failures writing the output itself are not user errors
//! and do propagate.

use crate::cli::output::Renderer;
use eyre::Result;
use rusqlite::Connection;
use std::io::Write;

pub struct Evaluator {
    conn: Connection,
    renderer: Renderer,
}

impl Evaluator {
    pub fn new(conn: Connection, renderer: Renderer) -> Self {
        Self { conn, renderer }
    }

    /// Execute one statement, writing result rows or an error diagnostic to
    /// `out`. Returns whether the statement succeeded.
    pub fn eval<W: Write>(&self, sql: &str, out: &mut W) -> Result<bool> {
        match self.run(sql, out) {
            Ok(()) => Ok(true),
            Err(report) => match report.downcast_ref::<rusqlite::Error>() {
                Some(db_err) => {
                    writeln!(out, "in [{}],\nerror: {}", sql, db_err)?;
                    Ok(false)
                }
                None => Err(report),
            },
        }
    }

    fn run<W: Write>(&self, sql: &str, out: &mut W) -> Result<()> {
        let lsql = sql.trim().to_lowercase();
        if lsql == "commit" {
            // Explicit flush of pending writes. A no-op when the connection
            // is already in autocommit, like a connection-level commit.
            if !self.conn.is_autocommit() {
                self.conn.execute_batch("COMMIT")?;
            }
            return Ok(());
        }

        let mut stmt = self.conn.prepare(sql)?;
        if is_row_producing(&lsql) {
            let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();
            let mut rows = stmt.query([])?;
            self.renderer.dump(&names, &mut rows, out)?;
        } else {
            // One step runs the statement to completion; any RETURNING rows
            // are not rendered.
            let mut rows = stmt.query([])?;
            rows.next()?;
        }
        Ok(())
    }
}

/// Row-producing statements are recognized by their leading keyword: the
/// query and introspection families render, everything else only executes.
fn is_row_producing(lsql: &str) -> bool {
    lsql.starts_with("select") || lsql.starts_with("pragma")
}

/// Run statements in order, stopping at the first failure. Returns whether
/// every statement succeeded; statements after a failure never execute.
pub fn run_batch<W: Write>(
    evaluator: &Evaluator,
    statements: &[String],
    out: &mut W,
) -> Result<bool> {
    for sql in statements {
        if !evaluator.eval(sql, out)? {
            return Ok(false);
        }
    }
    Ok(true)
}
