//! # sq3 CLI Module
//!
//! The interactive shell: a statement-buffering REPL, an evaluator that
//! drives one SQLite connection, and a renderer that lays result sets out
//! in seven textual formats.
//!
//! ## Architecture
//!
//! ```text
//! raw line ──► StatementBuffer ──► sqlite3_complete()? ──► Evaluator
//!                    │ no                                      │
//!                    └──── keep accumulating                   ▼
//!                                                   row-producing statement?
//!                                                          │ yes
//!                                                          ▼
//!                                                       Renderer ──► stdout
//! ```
//!
//! ## Module Organization
//!
//! - `args`: startup options (database target, output mode, batch SQL)
//! - `complete`: dialect-aware statement-completeness predicate
//! - `repl`: line loop with rustyline integration and statement buffering
//! - `eval`: statement execution, commit handling, error diagnostics
//! - `output`: the seven result formats, streamed in 100-row pages
//! - `history`: history file path resolution and management

pub mod args;
pub mod complete;
pub mod eval;
pub mod history;
pub mod output;
pub mod repl;

pub use eval::Evaluator;
pub use output::{OutputMode, Renderer};
pub use repl::Repl;
