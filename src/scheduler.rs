//! Recalculation scheduler (spec.md §4.6 step 7, §4.7): once an edited
//! cell's own value is settled, every transitive dependent must be
//! re-evaluated, each only after all of *its* own not-yet-settled
//! dependencies are done.
//!
//! Two passes, matching the teacher's `recalculate_dependents` shape:
//! collect the affected set by walking `rdeps` (`graph::rdeps_closure`),
//! then drain it in topological order via Kahn's algorithm with local
//! in-degree counts scoped to that set. A cell outside the affected set
//! never changes this recalculation, so it never gates anything in it.

use crate::error::{CommandStatus, EvalError};
use crate::graph::rdeps_closure;
use crate::parser;
use crate::types::{CellStatus, Coord, Sheet};
use std::collections::{HashMap, HashSet, VecDeque};

/// Evaluates `coord`'s formula against the current sheet and writes the
/// result (or poisoned error state) back into the cell. A cell with no
/// formula (a bare literal, or a freshly-created cell) is left untouched.
/// Returns the raw `EvalError` so callers can distinguish "poison and
/// keep going" failures from "stop the cascade" ones.
pub fn eval_cell(sheet: &mut Sheet, coord: Coord) -> Result<(), EvalError> {
    let Some(formula) = sheet.cell(coord).formula.clone() else {
        return Ok(());
    };
    match parser::evaluate(sheet, &formula) {
        Ok(value) => {
            let cell = sheet.cell_mut(coord);
            cell.value = value;
            cell.status = CellStatus::Ok;
            Ok(())
        }
        Err(e @ (EvalError::DivZero | EvalError::PropagatedError)) => {
            let cell = sheet.cell_mut(coord);
            cell.status = CellStatus::Error;
            cell.value = 0;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

/// Re-evaluates every cell transitively dependent on `start`, in an order
/// that never evaluates a cell before something it reads that is itself
/// being recalculated this round. Assumes the caller has already verified
/// the dependency graph is acyclic (spec.md §4.6 step 5 runs before this).
///
/// `DivZero`/`PropagatedError` poison the cell (`value=0, status=ERROR`)
/// and the cascade continues — descendants simply evaluate against an
/// error parent. `BadRange`/`Parse`/`OutOfBounds` instead stop the cascade
/// immediately (spec.md §4.7 step 4): the remaining queue is left
/// unevaluated and the triggering status is returned to the caller, which
/// surfaces it as the command's overall status instead of `ok`.
pub fn recalculate(sheet: &mut Sheet, start: Coord) -> Option<CommandStatus> {
    let affected = rdeps_closure(sheet, start);
    if affected.is_empty() {
        return None;
    }
    let affected_set: HashSet<Coord> = affected.iter().copied().collect();

    let mut indegree: HashMap<Coord, usize> = HashMap::with_capacity(affected.len());
    for &node in &affected {
        let deg = sheet
            .cell(node)
            .deps
            .iter()
            .filter(|d| affected_set.contains(d))
            .count();
        indegree.insert(node, deg);
    }

    let mut queue: VecDeque<Coord> = affected
        .iter()
        .copied()
        .filter(|n| indegree[n] == 0)
        .collect();

    while let Some(node) = queue.pop_front() {
        match eval_cell(sheet, node) {
            Ok(()) | Err(EvalError::DivZero) | Err(EvalError::PropagatedError) => {}
            Err(EvalError::BadRange) => return Some(CommandStatus::InvalidRange),
            Err(EvalError::Parse) => return Some(CommandStatus::Unrecognized),
            Err(EvalError::OutOfBounds) => return Some(CommandStatus::RangeOutOfBounds),
        }

        let rdeps: Vec<Coord> = sheet
            .cell(node)
            .rdeps
            .iter()
            .copied()
            .filter(|r| affected_set.contains(r))
            .collect();
        for r in rdeps {
            let deg = indegree.get_mut(&r).expect("r is in affected_set");
            *deg -= 1;
            if *deg == 0 {
                queue.push_back(r);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::install_deps;
    use std::collections::HashSet as Set;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn wire(sheet: &mut Sheet, target: Coord, formula: &str, deps_on: &[Coord]) {
        sheet.cell_mut(target).formula = Some(formula.to_string());
        let mut deps = Set::new();
        for &d in deps_on {
            deps.insert(d);
        }
        install_deps(sheet, target, deps);
    }

    #[test]
    fn chain_recalculates_in_dependency_order() {
        let mut sheet = Sheet::new(3, 3);
        sheet.cell_mut(c(0, 0)).value = 1; // A1 literal
        wire(&mut sheet, c(0, 1), "A1+1", &[c(0, 0)]); // B1 = A1+1
        wire(&mut sheet, c(0, 2), "B1+1", &[c(0, 1)]); // C1 = B1+1

        eval_cell(&mut sheet, c(0, 1)).unwrap();
        assert_eq!(recalculate(&mut sheet, c(0, 0)), None);

        assert_eq!(sheet.cell(c(0, 1)).value, 2);
        assert_eq!(sheet.cell(c(0, 2)).value, 3);
    }

    #[test]
    fn div_zero_poisons_and_cascade_continues() {
        let mut sheet = Sheet::new(3, 3);
        wire(&mut sheet, c(0, 0), "1/0", &[]);
        wire(&mut sheet, c(0, 1), "A1+1", &[c(0, 0)]);

        eval_cell(&mut sheet, c(0, 0)).unwrap_err();
        assert_eq!(recalculate(&mut sheet, c(0, 0)), None);

        assert_eq!(sheet.cell(c(0, 0)).status, CellStatus::Error);
        assert_eq!(sheet.cell(c(0, 1)).status, CellStatus::Error);
    }

    #[test]
    fn diamond_dependency_evaluates_each_cell_once() {
        let mut sheet = Sheet::new(3, 3);
        sheet.cell_mut(c(0, 0)).value = 10; // A1
        wire(&mut sheet, c(0, 1), "A1+1", &[c(0, 0)]); // B1
        wire(&mut sheet, c(1, 0), "A1+2", &[c(0, 0)]); // A2
        wire(&mut sheet, c(1, 1), "B1+A2", &[c(0, 1), c(1, 0)]); // B2

        assert_eq!(recalculate(&mut sheet, c(0, 0)), None);

        assert_eq!(sheet.cell(c(0, 1)).value, 11);
        assert_eq!(sheet.cell(c(1, 0)).value, 12);
        assert_eq!(sheet.cell(c(1, 1)).value, 23);
    }

    #[test]
    fn unaffected_cells_are_left_alone() {
        let mut sheet = Sheet::new(3, 3);
        sheet.cell_mut(c(2, 2)).value = 99;
        recalculate(&mut sheet, c(0, 0));
        assert_eq!(sheet.cell(c(2, 2)).value, 99);
    }

    #[test]
    fn out_of_bounds_stops_cascade_without_poisoning() {
        let mut sheet = Sheet::new(3, 3);
        wire(&mut sheet, c(0, 0), "0", &[]);
        wire(&mut sheet, c(0, 1), "Z1000+1", &[c(0, 0)]);
        sheet.cell_mut(c(0, 1)).value = 7; // pre-existing value should survive

        let status = recalculate(&mut sheet, c(0, 0));

        assert_eq!(status, Some(CommandStatus::RangeOutOfBounds));
        assert_eq!(sheet.cell(c(0, 1)).value, 7);
        assert_eq!(sheet.cell(c(0, 1)).status, CellStatus::Ok);
    }
}
