//! Internal evaluator errors and the user-facing status strings derived
//! from them (spec.md §4.2's error kinds, §6's status vocabulary).

use thiserror::Error;

/// Error kinds the evaluator can raise while computing a formula's value.
/// Collapsed into a `Cell`'s `status` at the engine boundary (spec.md §7);
/// `Parse`/`BadRange`/`OutOfBounds` additionally surface as a status
/// message rather than poisoning the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("parse error")]
    Parse,
    #[error("invalid range")]
    BadRange,
    #[error("division by zero")]
    DivZero,
    #[error("propagated error")]
    PropagatedError,
    #[error("reference out of bounds")]
    OutOfBounds,
}

/// Outcome of a single REPL command, rendered into the `(<status>)` slot of
/// the prompt line (spec.md §6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    Unrecognized,
    InvalidCell,
    CellOutOfBounds,
    InvalidCommand,
    InvalidFormula,
    InvalidRange,
    RangeOutOfBounds,
    CircularDependency(String),
}

impl std::fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandStatus::Ok => write!(f, "ok"),
            CommandStatus::Unrecognized => write!(f, "Unrecognized"),
            CommandStatus::InvalidCell => write!(f, "Invalid cell"),
            CommandStatus::CellOutOfBounds => write!(f, "Cell out of bounds"),
            CommandStatus::InvalidCommand => write!(f, "Invalid command"),
            CommandStatus::InvalidFormula => write!(f, "Invalid formula"),
            CommandStatus::InvalidRange => write!(f, "Invalid range"),
            CommandStatus::RangeOutOfBounds => write!(f, "Range out of bounds"),
            CommandStatus::CircularDependency(name) => {
                write!(f, "Circular dependency detected in cell {name}")
            }
        }
    }
}
