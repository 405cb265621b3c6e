// src/select/truncate.rs
//! Head/middle/tail truncation of long files.

use std::borrow::Cow;

/// Smallest cap that still leaves room for every slice and both markers.
pub const MIN_LINE_CAP: usize = 8;

/// Shortens `content` to at most `line_cap` lines.
///
/// Keeps the first third, a centred middle slice and the last third of the
/// line budget, separated by two marker lines. Content already within the
/// cap is returned borrowed and unchanged, so truncating twice is a no-op.
#[must_use]
pub fn truncate(content: &str, line_cap: usize) -> Cow<'_, str> {
    let cap = line_cap.max(MIN_LINE_CAP);
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len();
    if total <= cap {
        return Cow::Borrowed(content);
    }

    let keep = cap - 2;
    let head = keep / 3;
    let tail = keep / 3;
    let middle = keep - head - tail;

    let gap = total - head - tail;
    let mid_start = head + (gap - middle) / 2;
    let mid_end = mid_start + middle;

    let mut out: Vec<String> = Vec::with_capacity(cap);
    out.extend(lines[..head].iter().map(ToString::to_string));
    out.push(marker(mid_start - head));
    out.extend(lines[mid_start..mid_end].iter().map(ToString::to_string));
    out.push(marker(total - tail - mid_end));
    out.extend(lines[total - tail..].iter().map(ToString::to_string));
    Cow::Owned(out.join("\n"))
}

fn marker(omitted: usize) -> String {
    format!("[... {omitted} lines truncated ...]")
}
