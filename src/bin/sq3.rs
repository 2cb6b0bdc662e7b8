//! # sq3 CLI Entry Point
//!
//! ## Usage
//!
//! ```bash
//! # interactive shell on a transient in-memory database
//! sq3
//!
//! # interactive shell on a file
//! sq3 ./my.db
//!
//! # batch mode: run statements and exit
//! sq3 ./my.db "create table t(a);" "insert into t values(1);" "select * from t;"
//!
//! # lockfree read-only access, json output
//! sq3 -readonly -json ./my.db "select * from t;"
//!
//! # engine and shell versions
//! sq3 -V
//! ```

use eyre::Result;
use rusqlite::Connection;
use sq3::cli::args::{Options, MEMORY_PATH};
use sq3::cli::eval::{run_batch, Evaluator};
use sq3::cli::output::Renderer;
use sq3::cli::repl::Repl;
use std::env;
use std::io;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = Options::parse(&args)?;

    if opts.help {
        print_usage();
        return Ok(0);
    }
    if opts.version {
        print_version()?;
        return Ok(0);
    }

    let conn = opts.open()?;
    let renderer = Renderer::new(opts.mode, opts.separator.clone());
    let evaluator = Evaluator::new(conn, renderer);

    if !opts.sql.is_empty() {
        let mut out = io::stdout().lock();
        let ok = run_batch(&evaluator, &opts.sql, &mut out)?;
        return Ok(if ok { 0 } else { 1 });
    }

    if opts.database == MEMORY_PATH {
        println!("Connected to a transient in-memory database.");
    }

    let mut repl = Repl::new(evaluator)?;
    repl.run()?;
    Ok(0)
}

fn print_version() -> Result<()> {
    let conn = Connection::open_in_memory()?;
    let threadsafe: String = conn
        .query_row(
            "select compile_options from pragma_compile_options \
             where compile_options like 'THREADSAFE=%'",
            [],
            |row| row.get(0),
        )
        .unwrap_or_else(|_| "THREADSAFE=?".to_string());

    println!("sqlite {} {}", rusqlite::version(), threadsafe);
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn print_usage() {
    println!("sq3 - minimal replacement for the sqlite3 CLI");
    println!();
    println!("USAGE:");
    println!("    sq3 [OPTIONS] [FILENAME] [SQL]...");
    println!();
    println!("ARGS:");
    println!("    [FILENAME]    Database file (default: {})", MEMORY_PATH);
    println!("    [SQL]...      Statements to run in batch mode; without any,");
    println!("                  an interactive prompt is started");
    println!();
    println!("DB CONFIG:");
    println!("    -readonly     Open without write locking (lockfree, crashy)");
    println!();
    println!("OUTPUT FORMAT:");
    println!("    -box -column -json -jsonl -line -list -markdown");
    println!("                  Select the result format (default: markdown)");
    println!("    -separator S  Field separator for -list (default: \" | \")");
    println!();
    println!("INFO:");
    println!("    -V, -version  Print engine and shell versions");
    println!("    -h, -help     Print this help");
}
