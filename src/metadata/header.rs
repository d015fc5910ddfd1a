//! `Label: value` header scanning.
//!
//! Used for both release bodies and installed plugin files. Only the first
//! 8 KiB of the input are inspected.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of bytes scanned for headers.
pub const HEADER_READ_LIMIT: usize = 8 * 1024;

/// Characters allowed in front of a label (comment leaders and indentation).
const LABEL_PREFIX: &[char] = &[' ', '\t', '/', '*', '#', '@'];

/// Reads header values for `labels` from the file at `path`.
///
/// Every requested label is present in the result; missing labels map to an
/// empty string.
pub fn read_headers(path: &Path, labels: &[&str]) -> io::Result<HashMap<String, String>> {
    let mut buf = Vec::with_capacity(HEADER_READ_LIMIT);
    File::open(path)?
        .take(HEADER_READ_LIMIT as u64)
        .read_to_end(&mut buf)?;

    let text = String::from_utf8_lossy(&buf);
    Ok(parse_headers(&text, labels))
}

/// Scans `text` for header values. See [`read_headers`].
#[must_use]
pub fn parse_headers(text: &str, labels: &[&str]) -> HashMap<String, String> {
    let text = text.replace('\r', "\n");

    labels
        .iter()
        .map(|label| {
            let value = text
                .lines()
                .find_map(|line| match_label(line, label))
                .unwrap_or_default();
            ((*label).to_string(), value)
        })
        .collect()
}

/// Returns the cleaned value if `line` carries `label`.
fn match_label(line: &str, label: &str) -> Option<String> {
    let line = line.trim_start_matches("<?php");
    let rest = line.trim_start_matches(LABEL_PREFIX);

    let head = rest.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let value = rest[label.len()..].strip_prefix(':')?;

    Some(cleanup_value(value))
}

/// Trims a header value and drops a trailing comment/tag terminator.
fn cleanup_value(value: &str) -> String {
    let value = value.trim();
    let value = value
        .strip_suffix("*/")
        .or_else(|| value.strip_suffix("?>"))
        .unwrap_or(value);
    value.trim().to_string()
}
