//! Cell name codec (spec.md §4.1): the bijection between `(row, col)`
//! coordinates and textual names like `A1`, `AA12`, `ZZ1`.

use crate::types::Coord;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A single cell reference: one or more letters followed by one or more
    /// digits, nothing else. Shared by the evaluator (§4.2) and the lexical
    /// dependency extractor (§4.3) so both passes agree on what a reference
    /// looks like.
    pub static ref CELL_REF_RE: Regex = Regex::new(r"^[A-Za-z]+[0-9]+$").unwrap();

    /// A reference, optionally followed by `:` and a second reference —
    /// the shape the lexical dependency extractor scans a formula string
    /// for (§4.3): a lone cell read, or a range's two endpoints.
    pub static ref CELL_REF_SCAN_RE: Regex =
        Regex::new(r"(?i)([A-Za-z]+[0-9]+)(?::([A-Za-z]+[0-9]+))?").unwrap();
}

/// Decodes a column-letter run (`A..Z, AA..ZZ, AAA..`) into a 0-based
/// column index. Case-insensitive. Returns `None` on overflow (absurdly
/// long letter runs) rather than wrapping.
pub fn decode_column(letters: &str) -> Option<i32> {
    let mut result: i64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as i64) - ('A' as i64) + 1;
        result = result * 26 + digit;
        if result > i32::MAX as i64 {
            return None;
        }
    }
    if result == 0 {
        None
    } else {
        Some((result - 1) as i32)
    }
}

/// Encodes a 0-based column index back into uppercase letters.
pub fn encode_column(col: i32) -> String {
    let mut n = col as i64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Splits a cell-reference token like `AA12` into its letter run and digit
/// run. Returns `None` if the token is not a single maximal letter run
/// followed by a single maximal digit run (spec.md §4.1: "any remaining
/// character invalidates").
fn split_reference(s: &str) -> Option<(&str, &str)> {
    let digit_start = s.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = s.split_at(digit_start);
    if letters.is_empty() || digits.is_empty() {
        return None;
    }
    if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((letters, digits))
}

/// Parses a cell name (`name_to_coord`, spec.md §4.1) without any bounds
/// check against a particular sheet. Returns `None` on malformed input or
/// on row/column numbers too large to represent.
pub fn name_to_coord(name: &str) -> Option<Coord> {
    let (letters, digits) = split_reference(name)?;
    let col = decode_column(letters)?;
    let row: i64 = digits.parse().ok()?;
    if row < 1 || row > i32::MAX as i64 {
        return None;
    }
    Some(Coord::new((row - 1) as i32, col))
}

/// Inverse of `name_to_coord` (`coord_to_name`, spec.md §4.1).
pub fn coord_to_name(coord: Coord) -> String {
    format!("{}{}", encode_column(coord.col), coord.row + 1)
}
