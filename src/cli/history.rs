//! History file path resolution.
//!
//! By default history is stored in `~/.sq3_history`. The location can be
//! overridden with the `SQ3_HISTORY` environment variable; an empty value
//! disables persistence. The path is resolved once at startup and handed to
//! rustyline, which does the actual file I/O.

use std::env;
use std::path::PathBuf;

const DEFAULT_HISTORY_FILE: &str = ".sq3_history";
const HISTORY_ENV_VAR: &str = "SQ3_HISTORY";

pub fn history_path() -> Option<PathBuf> {
    if let Ok(custom_path) = env::var(HISTORY_ENV_VAR) {
        if custom_path.is_empty() {
            return None;
        }
        return Some(PathBuf::from(custom_path));
    }

    home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE))
}

fn home_dir() -> Option<PathBuf> {
    env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test so the env var mutations cannot race each other
    #[test]
    fn history_path_resolution() {
        env::set_var(HISTORY_ENV_VAR, "/custom/path");
        assert_eq!(history_path(), Some(PathBuf::from("/custom/path")));

        env::set_var(HISTORY_ENV_VAR, "");
        assert_eq!(history_path(), None);

        env::remove_var(HISTORY_ENV_VAR);
        if let Some(path) = history_path() {
            assert!(path.to_string_lossy().contains(".sq3_history"));
        }
    }
}
