//! End-to-end shell flows: statement buffering, evaluation, rendering, and
//! batch/readonly behavior against real SQLite databases.

use rusqlite::Connection;
use sq3::cli::args::Options;
use sq3::{run_batch, Evaluator, OutputMode, Renderer, StatementBuffer};

fn memory_evaluator(mode: OutputMode) -> Evaluator {
    let conn = Connection::open_in_memory().unwrap();
    Evaluator::new(conn, Renderer::new(mode, " | "))
}

fn eval_str(ev: &Evaluator, sql: &str) -> (bool, String) {
    let mut out = Vec::new();
    let ok = ev.eval(sql, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
}

#[test]
fn create_insert_select_renders_markdown_block() {
    let ev = memory_evaluator(OutputMode::Markdown);
    assert!(eval_str(&ev, "create table t(a,b);").0);
    assert!(eval_str(&ev, "insert into t values(1,2);").0);
    let (ok, output) = eval_str(&ev, "select * from t;");
    assert!(ok);
    assert_eq!(output, "| a | b |\n|---|---|\n| 1 | 2 |\n");
}

#[test]
fn multi_line_statement_buffers_then_dispatches_once() {
    let ev = memory_evaluator(OutputMode::List);
    let mut buffer = StatementBuffer::new();

    assert_eq!(buffer.push_line("select 1 as a,"), None);
    assert_eq!(buffer.push_line(" 2 as b"), None);
    let sql = buffer.push_line(";").unwrap();
    assert_eq!(sql, "select 1 as a, 2 as b;");
    assert!(buffer.is_empty());

    let (ok, output) = eval_str(&ev, &sql);
    assert!(ok);
    assert_eq!(output, "a | b\n1 | 2\n");
}

#[test]
fn buffer_resets_even_when_the_statement_fails() {
    let ev = memory_evaluator(OutputMode::List);
    let mut buffer = StatementBuffer::new();

    let sql = buffer.push_line("select * from missing;").unwrap();
    assert!(buffer.is_empty());
    let (ok, output) = eval_str(&ev, &sql);
    assert!(!ok);
    assert!(output.starts_with("in [select * from missing;],"));

    let sql = buffer.push_line("select 7 as n;").unwrap();
    let (ok, output) = eval_str(&ev, &sql);
    assert!(ok);
    assert_eq!(output, "n\n7\n");
}

#[test]
fn batch_on_a_file_database_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.db").to_str().unwrap().to_string();

    let opts = Options {
        database: path.clone(),
        ..Options::default()
    };
    let ev = Evaluator::new(opts.open().unwrap(), Renderer::new(OutputMode::List, " | "));

    let statements: Vec<String> = [
        "create table t(a);",
        "insert into nope values(1);",
        "insert into t values(1);",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let mut out = Vec::new();
    let ok = run_batch(&ev, &statements, &mut out).unwrap();
    assert!(!ok);
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("in [insert into nope values(1);],"));
    drop(ev);

    // the table exists but the statement after the failure never ran
    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("select count(*) from t", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn readonly_open_rejects_writes_but_serves_reads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro.db").to_str().unwrap().to_string();

    let setup = Options {
        database: path.clone(),
        ..Options::default()
    };
    let ev = Evaluator::new(setup.open().unwrap(), Renderer::new(OutputMode::List, " | "));
    assert!(eval_str(&ev, "create table t(a);").0);
    assert!(eval_str(&ev, "insert into t values(42);").0);
    drop(ev);

    let readonly = Options {
        database: path,
        readonly: true,
        ..Options::default()
    };
    let ev = Evaluator::new(
        readonly.open().unwrap(),
        Renderer::new(OutputMode::List, " | "),
    );

    let (ok, output) = eval_str(&ev, "insert into t values(7);");
    assert!(!ok);
    assert!(output.contains("readonly"));

    let (ok, output) = eval_str(&ev, "select a from t;");
    assert!(ok);
    assert_eq!(output, "a\n42\n");
}

#[test]
fn json_mode_output_parses_back_to_the_result_set() {
    let ev = memory_evaluator(OutputMode::Json);
    assert!(eval_str(&ev, "create table t(a, b);").0);
    assert!(eval_str(&ev, "insert into t values(1, 'one');").0);
    assert!(eval_str(&ev, "insert into t values(2, null);").0);

    let (ok, output) = eval_str(&ev, "select a, b from t order by a;");
    assert!(ok);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(rows[0]["b"], "one");
    assert!(rows[1]["b"].is_null());
}
