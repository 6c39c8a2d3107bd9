//! Sending text files: path resolution, reading, and whitespace clean-up.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TrainerError;

/// Expand `$VAR`, `${VAR}`, and a leading `~`, then make the path absolute.
///
/// Unset variables are left as written.
pub fn resolve_path(input: &str) -> Result<PathBuf, TrainerError> {
    let expanded = expand_home(&expand_vars(input.trim()));
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = env::current_dir().map_err(|e| TrainerError::FileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(cwd.join(path))
}

fn expand_home(path: &str) -> String {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return path.to_string(),
    };
    match dirs::home_dir() {
        Some(home) => format!("{}{}", home.display(), rest),
        None => path.to_string(),
    }
}

fn expand_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }
        let mut name = String::new();
        while let Some(&n) = chars.peek() {
            if n.is_ascii_alphanumeric() || n == '_' {
                name.push(n);
                chars.next();
            } else {
                break;
            }
        }
        let closed = braced && chars.peek() == Some(&'}');
        if closed {
            chars.next();
        }

        match env::var(&name) {
            Ok(value) if !name.is_empty() && (!braced || closed) => out.push_str(&value),
            _ => {
                out.push('$');
                if braced {
                    out.push('{');
                }
                out.push_str(&name);
                if closed {
                    out.push('}');
                }
            }
        }
    }
    out
}

/// Read a file as UTF-8, replacing invalid sequences.
pub fn load_text_file(path: &Path) -> Result<String, TrainerError> {
    let bytes = fs::read(path).map_err(|e| TrainerError::FileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded text file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Collapse every run of whitespace (newlines included) to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
