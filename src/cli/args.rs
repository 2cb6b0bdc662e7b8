//! Startup configuration.
//!
//! A hand-rolled argument loop: single-dash long options, one optional
//! database path (defaulting to the transient in-memory marker), and any
//! remaining positionals taken as SQL statements to run in batch mode.

use crate::cli::output::OutputMode;
use eyre::{bail, Result, WrapErr};
use rusqlite::{Connection, OpenFlags};

/// Target marker for an ephemeral in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

const DEFAULT_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub database: String,
    pub sql: Vec<String>,
    pub readonly: bool,
    pub mode: OutputMode,
    pub separator: String,
    pub version: bool,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            database: MEMORY_PATH.to_string(),
            sql: Vec::new(),
            readonly: false,
            mode: OutputMode::Markdown,
            separator: DEFAULT_SEPARATOR.to_string(),
            version: false,
            help: false,
        }
    }
}

impl Options {
    /// Parse command-line arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Options> {
        let mut opts = Options::default();
        let mut positionals: Vec<String> = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-box" => opts.mode = OutputMode::Box,
                "-column" => opts.mode = OutputMode::Column,
                "-json" => opts.mode = OutputMode::Json,
                "-jsonl" => opts.mode = OutputMode::Jsonl,
                "-line" => opts.mode = OutputMode::Line,
                "-list" => opts.mode = OutputMode::List,
                "-markdown" => opts.mode = OutputMode::Markdown,
                "-readonly" => opts.readonly = true,
                "-separator" => {
                    let Some(sep) = iter.next() else {
                        bail!("-separator requires a value");
                    };
                    opts.separator = sep.clone();
                }
                "-V" | "-version" => opts.version = true,
                "-h" | "-help" | "--help" => opts.help = true,
                flag if flag.starts_with('-') => bail!("unknown option: {}", flag),
                _ => positionals.push(arg.clone()),
            }
        }

        let mut positionals = positionals.into_iter();
        if let Some(path) = positionals.next() {
            opts.database = path;
        }
        opts.sql = positionals.collect();
        Ok(opts)
    }

    /// Open the configured database target.
    ///
    /// Read-only mode opens through a `file:` URI with `nolock=1`: no file
    /// locking at all, which is faster but unsafe under concurrent writers.
    /// The in-memory marker has no lock to drop, so the flag is ignored
    /// there.
    pub fn open(&self) -> Result<Connection> {
        if self.readonly && self.database != MEMORY_PATH {
            let uri = format!("file:{}?mode=ro&nolock=1", self.database);
            let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            Connection::open_with_flags(&uri, flags)
                .wrap_err_with(|| format!("failed to open {} read-only", self.database))
        } else {
            Connection::open(&self.database)
                .wrap_err_with(|| format!("failed to open {}", self.database))
        }
    }
}
