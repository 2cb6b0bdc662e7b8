//! # Result Renderer
//!
//! Lays a query's column names and row stream out as text, in one of seven
//! formats selected once at startup:
//!
//! | Mode       | Shape                                                  |
//! |------------|--------------------------------------------------------|
//! | `box`      | box-drawing borders, centered cells                    |
//! | `markdown` | pipe table with a dashed divider row, centered cells   |
//! | `column`   | plain left-aligned columns, two-space gutters          |
//! | `list`     | separator-joined header line and value lines           |
//! | `line`     | one `name = value` line per column, blank-line records |
//! | `json`     | one pretty-printed array of objects                    |
//! | `jsonl`    | one compact object per row                             |
//!
//! ## Streaming
//!
//! The row source is a forward-only cursor. The width-aligned modes pull it
//! in pages of 100 rows, compute column widths per page, and emit a complete
//! block per page. Very uneven value widths across pages can therefore
//! misalign between blocks; the alternative is buffering the whole result
//! set, which only `json` mode does (an enclosing pretty-printed array
//! cannot be written incrementally).
//!
//! ## NULL handling
//!
//! NULL stringifies to `NULL` wherever a natural text form is needed (list
//! mode, width computation). The tabular modes render the cell itself as the
//! placeholder `(/)` so an absent value stays distinguishable from the
//! four-character string `NULL` and from an empty string.

use eyre::Result;
use rusqlite::types::Value;
use rusqlite::Rows;
use std::io::Write;

/// Rows pulled from the cursor per width-aligned block.
const PAGE_SIZE: usize = 100;

/// Placeholder for NULL cells in the tabular modes.
const NULL_CELL: &str = "(/)";

const BLOB_PREVIEW_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Box,
    Column,
    Json,
    Jsonl,
    Line,
    List,
    Markdown,
}

pub struct Renderer {
    mode: OutputMode,
    separator: String,
}

impl Renderer {
    pub fn new(mode: OutputMode, separator: impl Into<String>) -> Self {
        Self {
            mode,
            separator: separator.into(),
        }
    }

    /// Write the complete rendering of one result set to `out`.
    ///
    /// `rows` is consumed lazily; every mode except `json` streams it.
    pub fn dump<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        match self.mode {
            OutputMode::List => self.dump_list(names, rows, out),
            OutputMode::Line => self.dump_line(names, rows, out),
            OutputMode::Json => self.dump_json(names, rows, out),
            OutputMode::Jsonl => self.dump_jsonl(names, rows, out),
            OutputMode::Box | OutputMode::Markdown | OutputMode::Column => {
                self.dump_paged(names, rows, out)
            }
        }
    }

    fn dump_list<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        writeln!(out, "{}", names.join(&self.separator))?;
        while let Some(values) = next_values(rows, names.len())? {
            let cells: Vec<String> = values.iter().map(text_value).collect();
            writeln!(out, "{}", cells.join(&self.separator))?;
        }
        Ok(())
    }

    fn dump_line<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        let name_width = names.iter().map(|n| n.len()).max().unwrap_or(1).max(5);
        while let Some(values) = next_values(rows, names.len())? {
            for (name, value) in names.iter().zip(&values) {
                writeln!(out, "{:>width$} = {}", name, text_value(value), width = name_width)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn dump_json<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        // The one mode that materializes the whole result set: an enclosing
        // pretty-printed array cannot be written incrementally.
        let mut records = Vec::new();
        while let Some(values) = next_values(rows, names.len())? {
            records.push(record(names, values));
        }
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    fn dump_jsonl<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        while let Some(values) = next_values(rows, names.len())? {
            writeln!(out, "{}", serde_json::to_string(&record(names, values))?)?;
        }
        Ok(())
    }

    fn dump_paged<W: Write>(
        &self,
        names: &[String],
        rows: &mut Rows<'_>,
        out: &mut W,
    ) -> Result<()> {
        loop {
            let mut page = Vec::with_capacity(PAGE_SIZE);
            while page.len() < PAGE_SIZE {
                match next_values(rows, names.len())? {
                    Some(values) => page.push(values),
                    None => break,
                }
            }
            if page.is_empty() {
                return Ok(());
            }
            let exhausted = page.len() < PAGE_SIZE;
            self.dump_page(names, &page, out)?;
            if exhausted {
                return Ok(());
            }
        }
    }

    /// Emit one complete width-aligned block: widths are recomputed from
    /// this page alone, and each page redraws its own header and borders.
    fn dump_page<W: Write>(
        &self,
        names: &[String],
        page: &[Vec<Value>],
        out: &mut W,
    ) -> Result<()> {
        let (widths, cells) = layout(names, page);
        match self.mode {
            OutputMode::Box => {
                writeln!(out, "{}", border(&widths, ["┌", "┬", "┐"], "─"))?;
                writeln!(out, "{}", tabular_row(names, &widths, "│"))?;
                writeln!(out, "{}", border(&widths, ["├", "┼", "┤"], "─"))?;
                for row in &cells {
                    writeln!(out, "{}", tabular_row(row, &widths, "│"))?;
                }
                writeln!(out, "{}", border(&widths, ["└", "┴", "┘"], "─"))?;
            }
            OutputMode::Markdown => {
                writeln!(out, "{}", tabular_row(names, &widths, "|"))?;
                writeln!(out, "{}", border(&widths, ["|", "|", "|"], "-"))?;
                for row in &cells {
                    writeln!(out, "{}", tabular_row(row, &widths, "|"))?;
                }
            }
            OutputMode::Column => {
                writeln!(out, "{}", column_row(names, &widths).trim_end())?;
                for row in &cells {
                    writeln!(out, "{}", column_row(row, &widths))?;
                }
            }
            // startup validation constrains the mode to the set above
            _ => unreachable!("non-tabular output mode in tabular renderer"),
        }
        Ok(())
    }
}

/// Pull one row off the cursor as owned scalar values.
fn next_values(rows: &mut Rows<'_>, width: usize) -> Result<Option<Vec<Value>>> {
    let Some(row) = rows.next()? else {
        return Ok(None);
    };
    let mut values = Vec::with_capacity(width);
    for i in 0..width {
        values.push(row.get::<_, Value>(i)?);
    }
    Ok(Some(values))
}

/// Natural textual form of a scalar: used verbatim by the list and line
/// modes and for column-width computation. NULL stringifies to `NULL` here;
/// only the tabular cell rendering substitutes the placeholder.
fn text_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{:.6}", f)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format_blob(b),
    }
}

fn format_blob(bytes: &[u8]) -> String {
    if bytes.len() <= BLOB_PREVIEW_BYTES {
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!("x'{}'", hex)
    } else {
        let hex: String = bytes[..BLOB_PREVIEW_BYTES]
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect();
        format!("x'{}'... ({} bytes)", hex, bytes.len())
    }
}

fn json_value(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(i),
        Value::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s),
        Value::Blob(b) => serde_json::Value::String(format_blob(&b)),
    }
}

fn record(names: &[String], values: Vec<Value>) -> serde_json::Map<String, serde_json::Value> {
    names
        .iter()
        .cloned()
        .zip(values.into_iter().map(json_value))
        .collect()
}

/// Column widths for one page, and its cells with NULLs already replaced by
/// the placeholder. Widths cover the header name and every value's natural
/// text form, the placeholder substitution happens after measuring.
fn layout(names: &[String], page: &[Vec<Value>]) -> (Vec<usize>, Vec<Vec<String>>) {
    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    let cells: Vec<Vec<String>> = page
        .iter()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let text = text_value(value);
                    widths[i] = widths[i].max(text.chars().count());
                    match value {
                        Value::Null => NULL_CELL.to_string(),
                        _ => text,
                    }
                })
                .collect()
        })
        .collect();
    (widths, cells)
}

fn border(widths: &[usize], edges: [&str; 3], hbar: &str) -> String {
    let mut line = String::new();
    let mut lead = edges[0];
    for w in widths {
        line.push_str(lead);
        line.push_str(&hbar.repeat(w + 2));
        lead = edges[1];
    }
    line.push_str(edges[2]);
    line
}

fn tabular_row(cells: &[String], widths: &[usize], vbar: &str) -> String {
    let mut line = String::from(vbar);
    for (cell, w) in cells.iter().zip(widths) {
        line.push_str(&format!(" {:^width$} {}", cell, vbar, width = *w));
    }
    line
}

fn column_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ")
}
