//! Statement-completeness detection.
//!
//! Deciding whether accumulated input forms one full SQL statement needs a
//! dialect-aware scanner: semicolons inside string literals, quoted
//! identifiers, and comments must not terminate a statement. SQLite ships
//! exactly that scanner as `sqlite3_complete()`, so this module binds it
//! through the FFI surface rusqlite re-exports instead of approximating it
//! with naive semicolon splitting.

use std::ffi::CString;

/// Returns true once `sql` ends with a complete SQL statement, i.e. a
/// semicolon token outside of any literal or comment.
///
/// Text containing an interior NUL can never reach the engine and is
/// reported incomplete.
pub fn is_complete(sql: &str) -> bool {
    let Ok(c_sql) = CString::new(sql) else {
        return false;
    };
    // SAFETY: c_sql is a valid NUL-terminated string that outlives the call.
    unsafe { rusqlite::ffi::sqlite3_complete(c_sql.as_ptr()) != 0 }
}
