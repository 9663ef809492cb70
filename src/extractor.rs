//! Lexical dependency extractor (spec.md §4.3): finds every cell this
//! formula's text mentions, independent of whether evaluation would ever
//! actually read it (see DESIGN.md, "Invariant 4 exception"). Used both to
//! install `deps`/`rdeps` edges during an edit and to pre-check for cycles
//! before an edit commits — both need the exact same answer, so there is
//! exactly one implementation of "what does this formula reference".
//!
//! This is a regex scan, not a parse: it does not reject malformed
//! formulas (that's `parser::check_syntax`'s job) and does not bounds-check
//! against a grid. A formula that fails to parse at all still yields
//! whatever references its text happens to contain. Function names like
//! `SUM` never match `CELL_REF_SCAN_RE` (no trailing digits), so they fall
//! out of the scan on their own — no separate keyword-exclusion list needed.

use crate::types::Coord;
use crate::utils::{name_to_coord, CELL_REF_SCAN_RE};
use std::collections::HashSet;

/// Every cell referenced by `formula`, ranges expanded to their full cell
/// set. Range endpoints are included even when reversed or malformed
/// (`B2:A1`) — `extract_deps` only reports what's lexically present; the
/// parser is responsible for rejecting the formula as `BadRange`. A
/// reference that fails to decode (absurdly large row/column) is simply
/// skipped, matching spec.md §4.3's "unrecognized runs are skipped
/// silently".
pub fn extract_deps(formula: &str) -> HashSet<Coord> {
    let mut deps = HashSet::new();
    for caps in CELL_REF_SCAN_RE.captures_iter(formula) {
        let first = name_to_coord(&caps[1]);
        let second = caps.get(2).and_then(|m| name_to_coord(m.as_str()));
        match (first, second) {
            (Some(a), Some(b)) => deps.extend(expand_range(a, b)),
            (Some(a), None) => {
                deps.insert(a);
            }
            (None, _) => {}
        }
    }
    deps
}

/// Expands a (possibly reversed or otherwise malformed) range into its
/// cell set, normalizing corners first so a reversed range still yields
/// the rectangle a well-formed one would have covered.
fn expand_range(a: Coord, b: Coord) -> Vec<Coord> {
    let row_lo = a.row.min(b.row);
    let row_hi = a.row.max(b.row);
    let col_lo = a.col.min(b.col);
    let col_hi = a.col.max(b.col);
    let mut out = Vec::new();
    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            out.push(Coord::new(row, col));
        }
    }
    out
}
