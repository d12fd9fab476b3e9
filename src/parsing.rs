//! Zero-allocation filtration line parsing utilities.
//!
//! Lines are located with memchr and fields are parsed straight from the
//! byte slices, so scanning a file allocates only the vertex vectors of the
//! simplices it produces.

use memchr::memchr;

/// Fast u32 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty, contains non-digit characters, or
/// overflows.
#[inline(always)]
pub fn parse_u32_fast(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u32)?;
    }
    Some(n)
}

/// Fast usize parsing for dimension fields.
#[inline(always)]
pub fn parse_usize_fast(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as usize)?;
    }
    Some(n)
}

/// Parse a filtration time.
///
/// Accepts anything `f64::from_str` accepts, including `inf` and `nan`.
#[inline]
pub fn parse_time(bytes: &[u8]) -> Option<f64> {
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

/// Split a line into whitespace-separated tokens.
#[inline]
pub fn tokens(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

/// Check if a line should be skipped (blank or comment).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    match line.iter().position(|b| !b.is_ascii_whitespace()) {
        Some(first) => line[first] == b'#',
        None => true,
    }
}

/// A located input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// 1-based line number in the input.
    pub number: usize,
    pub start: usize,
    pub end: usize,
}

/// Find all content lines in a buffer, skipping blank and comment lines.
///
/// Line numbers count every physical line so that errors point at the
/// right place. A trailing `\r` is excluded from the span.
pub fn find_lines(data: &[u8]) -> Vec<LineSpan> {
    let mut spans = Vec::with_capacity(data.len() / 16); // Estimate ~16 bytes per line
    let mut pos = 0;
    let mut number = 0;

    while pos < data.len() {
        number += 1;
        let line_start = pos;
        let (mut line_end, next) = match memchr(b'\n', &data[pos..]) {
            Some(offset) => (pos + offset, pos + offset + 1),
            // Last line without newline
            None => (data.len(), data.len()),
        };

        // Handle \r\n
        if line_end > line_start && data[line_end - 1] == b'\r' {
            line_end -= 1;
        }

        if !should_skip_line(&data[line_start..line_end]) {
            spans.push(LineSpan {
                number,
                start: line_start,
                end: line_end,
            });
        }

        pos = next;
    }

    spans
}
