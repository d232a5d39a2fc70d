//! # Peak-List Tokenizer
//!
//! Reference tables store each spectrum as free text of bracketed coordinate
//! pairs, e.g. `[123.4,5678][56.1,432]`, often wrapped across lines by the
//! spreadsheet that produced them. This module scans that text into ordered
//! numeric `(x, y)` pairs.
//!
//! ## Grammar
//!
//! A pair is `[` number `,` number `]` with no interior whitespace (all
//! whitespace is stripped before scanning). A number is an optional `+`/`-`
//! sign followed by one of:
//!
//! - digits (`12`)
//! - digits `.` digits (`12.3`)
//! - `.` digits (`.5`)
//!
//! Scientific notation is not part of the grammar: `[1e5,2]` produces no
//! match, by design. A trailing dot (`12.`) likewise fails the pair.
//!
//! ## Edge-case policy
//!
//! The scanner is deliberately permissive: any substring that does not form a
//! complete pair is skipped without an error, so a partially corrupt cell
//! degrades to a partial peak list. An empty cell yields an empty list.

/// Errors from peak-list tokenization.
#[derive(Debug, thiserror::Error)]
pub enum PeakParseError {
    /// A matched numeric literal failed float conversion.
    #[error("unparseable numeric literal in peak list: '{literal}'")]
    Numeric {
        /// The matched substring that failed to convert.
        literal: String,
    },
}

/// Parse a peak-list cell into ordered `(x, y)` pairs.
///
/// Whitespace (including line breaks) is removed before scanning, so pairs
/// may be split anywhere in the source cell. Returns an empty vector when the
/// text contains no well-formed pairs.
///
/// # Examples
///
/// ```
/// use voltrec::peaks::parse_peak_list;
///
/// let pairs = parse_peak_list("[1.0, 2.0]\n[3, 4]").unwrap();
/// assert_eq!(pairs, vec![(1.0, 2.0), (3.0, 4.0)]);
/// ```
pub fn parse_peak_list(text: &str) -> Result<Vec<(f64, f64)>, PeakParseError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = compact.as_bytes();

    let mut pairs = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'[' {
            if let Some((end, pair)) = match_pair(&compact, pos)? {
                pairs.push(pair);
                pos = end;
                continue;
            }
        }
        pos += 1;
    }

    Ok(pairs)
}

/// Attempt to match a complete `[x,y]` pair starting at `start`, which must
/// point at a `[`. Returns the index one past the closing bracket together
/// with the pair, or `None` when the text at `start` is not well formed.
fn match_pair(text: &str, start: usize) -> Result<Option<(usize, (f64, f64))>, PeakParseError> {
    let bytes = text.as_bytes();
    let mut pos = start + 1;

    let x_end = match scan_number(bytes, pos) {
        Some(end) => end,
        None => return Ok(None),
    };
    let x_literal = &text[pos..x_end];
    pos = x_end;

    if bytes.get(pos) != Some(&b',') {
        return Ok(None);
    }
    pos += 1;

    let y_end = match scan_number(bytes, pos) {
        Some(end) => end,
        None => return Ok(None),
    };
    let y_literal = &text[pos..y_end];
    pos = y_end;

    if bytes.get(pos) != Some(&b']') {
        return Ok(None);
    }

    let pair = (convert(x_literal)?, convert(y_literal)?);
    Ok(Some((pos + 1, pair)))
}

/// Scan a decimal literal at `pos` and return the index one past its end.
///
/// A dot must be followed by at least one digit; when it is not, the literal
/// ends before the dot (so `12.` leaves the `.` unconsumed and the enclosing
/// pair fails at the comma check).
fn scan_number(bytes: &[u8], mut pos: usize) -> Option<usize> {
    if matches!(bytes.get(pos), Some(&b'+') | Some(&b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(|b| b.is_ascii_digit()) {
        pos += 1;
    }
    let int_digits = pos - int_start;

    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(|b| b.is_ascii_digit()) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            return Some(frac_end);
        }
        return (int_digits > 0).then_some(pos);
    }

    (int_digits > 0).then_some(pos)
}

/// Convert a matched literal to `f64`. The scanner only admits literals that
/// standard decimal parsing accepts, so the error arm is defensive.
fn convert(literal: &str) -> Result<f64, PeakParseError> {
    literal.parse().map_err(|_| PeakParseError::Numeric {
        literal: literal.to_string(),
    })
}
