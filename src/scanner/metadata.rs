//! `__version__` / `__order__` extraction.

use crate::error::ScanError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__version__[ \t]*=[ \t]*(.*)$").unwrap());

static RE_ORDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^__order__[ \t]*=[ \t]*(.*)$").unwrap());

/// Metadata declared by a module.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub version: Option<String>,
    pub order: Option<i64>,
}

/// Scan `lines` for metadata assignments, skipping the first and last line.
///
/// A later declaration overrides an earlier one. An `__order__` that is not an
/// integer is fatal.
pub fn extract(path: &Path, lines: &[String]) -> Result<Metadata, ScanError> {
    let mut meta = Metadata::default();
    if lines.len() < 3 {
        return Ok(meta);
    }

    for (idx, line) in lines.iter().enumerate().take(lines.len() - 1).skip(1) {
        if let Some(caps) = RE_VERSION.captures(line) {
            meta.version = Some(unquote(&caps[1]).to_string());
            continue;
        }
        if let Some(caps) = RE_ORDER.captures(line) {
            let raw = unquote(&caps[1]);
            let order = raw.parse::<i64>().map_err(|_| ScanError::InvalidOrder {
                path: path.to_path_buf(),
                line: idx + 1,
                value: raw.to_string(),
            })?;
            meta.order = Some(order);
        }
    }

    Ok(meta)
}

/// The literal on the right of a metadata assignment.
///
/// A quoted value ends at its closing quote; anything after it, such as a
/// trailing comment, is dropped. An unquoted value ends at the first `#`.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.find(quote).map(|end| &rest[..end]))
        {
            return inner.trim();
        }
    }
    value.split('#').next().unwrap_or(value).trim()
}
