//! Dependency-edge bookkeeping and cycle detection, operating directly on
//! the `deps`/`rdeps` sets each `Cell` carries (spec.md §3's Data Model).
//!
//! Only the true, in-bounds cells of the grid hold `rdeps` — a formula can
//! lexically mention a coordinate outside the grid (`extractor::extract_deps`
//! doesn't filter those out), but there is no `Cell` there to record a
//! reverse edge on. `deps` still records it faithfully, since spec.md's
//! Invariant 3 ties `deps` to lexical extraction, not to validity.

use crate::types::{Coord, Sheet};
use std::collections::{HashSet, VecDeque};

/// Removes `coord`'s current outgoing edges, clearing the matching reverse
/// edge on each in-bounds dependency. Called before installing a cell's new
/// dependency set during an edit (spec.md §4.6 step 3).
pub fn clear_deps(sheet: &mut Sheet, coord: Coord) {
    let old_deps: Vec<Coord> = sheet.cell(coord).deps.iter().copied().collect();
    for dep in old_deps {
        if sheet.in_bounds(dep) {
            sheet.cell_mut(dep).rdeps.remove(&coord);
        }
    }
    sheet.cell_mut(coord).deps.clear();
}

/// Installs `coord`'s new outgoing edges and the matching reverse edges on
/// each in-bounds dependency (spec.md §4.6 step 4). Expects `clear_deps` to
/// have already been called for `coord` in this transaction.
pub fn install_deps(sheet: &mut Sheet, coord: Coord, deps: HashSet<Coord>) {
    for &dep in &deps {
        if sheet.in_bounds(dep) {
            sheet.cell_mut(dep).rdeps.insert(coord);
        }
    }
    sheet.cell_mut(coord).deps = deps;
}

/// True if `start` is reachable from itself by following `deps` edges,
/// i.e. installing `start`'s current deps would close a cycle (spec.md
/// §4.6 step 5). Assumes `install_deps` has already run for `start` in this
/// transaction, so `start.deps` reflects the *tentative* new edges.
pub fn has_cycle(sheet: &Sheet, start: Coord) -> bool {
    let mut visited: HashSet<Coord> = HashSet::new();
    let mut stack: Vec<Coord> = sheet
        .cell(start)
        .deps
        .iter()
        .copied()
        .filter(|c| sheet.in_bounds(*c))
        .collect();

    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        for &next in &sheet.cell(node).deps {
            if sheet.in_bounds(next) {
                stack.push(next);
            }
        }
    }
    false
}

/// Every cell transitively dependent on `start`, in BFS discovery order
/// (not yet topologically sorted — that's `scheduler`'s job). Excludes
/// `start` itself.
pub fn rdeps_closure(sheet: &Sheet, start: Coord) -> Vec<Coord> {
    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue: VecDeque<Coord> = sheet.cell(start).rdeps.iter().copied().collect();
    let mut order = Vec::new();

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        order.push(node);
        for &next in &sheet.cell(node).rdeps {
            if !visited.contains(&next) {
                queue.push_back(next);
            }
        }
    }
    order
}
