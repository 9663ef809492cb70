//! The edit transaction (spec.md §4.6): the only way a cell's formula,
//! value, or dependency edges change. Syntax-validates first so a
//! malformed formula never touches the graph, tentatively rewires edges,
//! checks for a cycle with full rollback, then evaluates and cascades.

use crate::error::{CommandStatus, EvalError};
use crate::extractor::extract_deps;
use crate::graph::{clear_deps, has_cycle, install_deps};
use crate::parser::{check_syntax, MAX_FORMULA_LEN};
use crate::scheduler::{eval_cell, recalculate};
use crate::types::{Coord, Sheet};
use crate::utils::coord_to_name;

/// Runs the full `<cellname>=<formula>` edit transaction against an
/// already-bounds-checked target `coord`. Returns the status to surface
/// on the command prompt.
pub fn update_cell(sheet: &mut Sheet, coord: Coord, formula: &str) -> CommandStatus {
    let span = tracing::info_span!("update_cell", cell = %coord_to_name(coord));
    let _enter = span.enter();

    let trimmed = formula.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_FORMULA_LEN {
        tracing::debug!(len = trimmed.len(), "formula rejected: empty or over length bound");
        return CommandStatus::InvalidFormula;
    }

    if let Err(e) = check_syntax(trimmed) {
        tracing::debug!(?e, "formula rejected at syntax validation");
        return match e {
            EvalError::BadRange => CommandStatus::InvalidRange,
            _ => CommandStatus::Unrecognized,
        };
    }

    let old_formula = sheet.cell(coord).formula.clone();
    let old_deps = sheet.cell(coord).deps.clone();

    clear_deps(sheet, coord);
    install_deps(sheet, coord, extract_deps(trimmed));

    if has_cycle(sheet, coord) {
        clear_deps(sheet, coord);
        sheet.cell_mut(coord).formula = old_formula;
        install_deps(sheet, coord, old_deps);
        tracing::warn!("rolled back: circular dependency");
        return CommandStatus::CircularDependency(coord_to_name(coord));
    }

    sheet.cell_mut(coord).formula = Some(trimmed.to_string());

    match eval_cell(sheet, coord) {
        Ok(()) | Err(EvalError::DivZero) | Err(EvalError::PropagatedError) => {
            match recalculate(sheet, coord) {
                Some(status) => status,
                None => CommandStatus::Ok,
            }
        }
        Err(EvalError::OutOfBounds) => {
            tracing::debug!("evaluation out of bounds; edit persists, no cascade");
            CommandStatus::RangeOutOfBounds
        }
        Err(EvalError::BadRange) => CommandStatus::InvalidRange,
        Err(EvalError::Parse) => CommandStatus::Unrecognized,
    }
}
