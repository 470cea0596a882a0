//! String-shaping helpers for synthesized snapshot literals.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static QUOTE_POUNDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r##""#*"##).unwrap());

/// Prefixes every non-empty line of `payload` with `prefix`. Empty lines stay
/// empty so that recorded snapshots do not acquire trailing whitespace.
#[must_use]
pub fn indent(payload: &str, prefix: &str) -> String {
    let mut indented = String::with_capacity(payload.len());
    for (i, line) in payload.split('\n').enumerate() {
        if i > 0 {
            indented.push('\n');
        }
        if !line.is_empty() {
            indented.push_str(prefix);
            indented.push_str(line);
        }
    }
    indented
}

/// Returns the smallest number of pound marks `k` such that embedding
/// `payload` between `r#..#"` and `"#..#` (`k` pounds on each side) yields a
/// raw string literal that does not close early.
#[must_use]
pub fn pound_count(payload: &str) -> usize {
    let mut count = usize::from(payload.contains('\\'));
    for needle in QUOTE_POUNDS_RE.find_iter(payload) {
        // A match is the quote plus the pound run that follows it, so its
        // length is exactly the number of pounds needed to clear it.
        count = count.max(needle.len());
    }
    count
}

/// Recovers the payload from the value of a synthesized literal. The leading
/// newline, the common indentation, and the final newline plus indent are the
/// embedding's framing, not part of the snapshot.
#[must_use]
pub fn normalize_inline(literal: &str) -> String {
    let mut lines = literal.split('\n').collect::<Vec<_>>();
    if lines.len() > 1 && lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.len() > 1 && lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let indentation = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indentation..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The file's prevailing one-level indent: the leading whitespace of the
/// first indented, non-blank line. Four spaces if the file has none.
#[must_use]
pub fn one_level_indent(source: &str) -> &str {
    source
        .split('\n')
        .find_map(|line| {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.len() == line.len() {
                None
            } else {
                Some(&line[..line.len() - trimmed.len()])
            }
        })
        .unwrap_or("    ")
}
