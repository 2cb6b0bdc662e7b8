//! # sq3 - Minimal SQLite Shell
//!
//! A small interactive shell for SQLite: a line-buffered REPL that
//! accumulates input until it forms a complete SQL statement, executes it
//! against one connection, and renders row-producing results in one of
//! seven textual formats.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rusqlite::Connection;
//! use sq3::{Evaluator, OutputMode, Renderer};
//!
//! let conn = Connection::open_in_memory()?;
//! let evaluator = Evaluator::new(conn, Renderer::new(OutputMode::Markdown, " | "));
//!
//! let mut out = std::io::stdout().lock();
//! evaluator.eval("create table t(a, b);", &mut out)?;
//! evaluator.eval("insert into t values(1, 2);", &mut out)?;
//! evaluator.eval("select * from t;", &mut out)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI Entry Point                         │
//! │                     (bin/sq3.rs)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       REPL Loop                             │
//! │  - Reads input via rustyline                                │
//! │  - Buffers lines until sqlite3_complete() accepts them      │
//! │  - Dispatches whole statements to the evaluator             │
//! ├─────────────────────────────────────────────────────────────┤
//! │     Evaluator          │      Renderer        │   History   │
//! │  execute / commit /    │  box column json     │  Persistent │
//! │  report diagnostics    │  jsonl line list     │  ~/.sq3_*   │
//! │                        │  markdown            │             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The SQL engine itself is SQLite, consumed through rusqlite; this crate
//! only buffers statements, drives execution, and lays out result sets.

pub mod cli;

pub use cli::eval::{run_batch, Evaluator};
pub use cli::output::{OutputMode, Renderer};
pub use cli::repl::{Repl, StatementBuffer};
