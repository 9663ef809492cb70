//! Viewport scrolling, grid rendering, and REPL command dispatch (spec.md
//! §6). Everything here is a thin collaborator around the edit
//! transaction in `cell.rs` — validating command shape and the target
//! cell name, then handing off.

use crate::cell::update_cell;
use crate::error::CommandStatus;
use crate::types::{CellStatus, Coord, Sheet};
use crate::utils::{encode_column, name_to_coord};
use std::io::{self, Write};

const VIEWPORT: i32 = 10;

fn scroll(sheet: &mut Sheet, direction: char) {
    let max_row_start = (sheet.rows - VIEWPORT).max(0);
    let max_col_start = (sheet.cols - VIEWPORT).max(0);
    match direction {
        'w' => sheet.view_row = (sheet.view_row - VIEWPORT).max(0),
        's' => sheet.view_row = (sheet.view_row + VIEWPORT).min(max_row_start),
        'a' => sheet.view_col = (sheet.view_col - VIEWPORT).max(0),
        'd' => sheet.view_col = (sheet.view_col + VIEWPORT).min(max_col_start),
        _ => {}
    }
}

fn scroll_to(sheet: &mut Sheet, name: &str) -> CommandStatus {
    match name_to_coord(name) {
        None => CommandStatus::InvalidCell,
        Some(coord) if !sheet.in_bounds(coord) => CommandStatus::CellOutOfBounds,
        Some(coord) => {
            sheet.view_row = coord.row;
            sheet.view_col = coord.col;
            CommandStatus::Ok
        }
    }
}

fn assign(sheet: &mut Sheet, target: &str, formula: &str) -> CommandStatus {
    match name_to_coord(target) {
        None => CommandStatus::InvalidCell,
        Some(coord) if !sheet.in_bounds(coord) => CommandStatus::CellOutOfBounds,
        Some(coord) => update_cell(sheet, coord, formula),
    }
}

/// Dispatches one line of input (spec.md §6's command table). `q` is
/// handled by the caller before reaching here, since quitting ends the
/// process rather than producing a status.
pub fn process_command(sheet: &mut Sheet, command: &str) -> CommandStatus {
    let span = tracing::info_span!("command", command);
    let _enter = span.enter();

    if command.len() == 1 {
        if let Some(dir @ ('w' | 'a' | 's' | 'd')) = command.chars().next() {
            scroll(sheet, dir);
            return CommandStatus::Ok;
        }
    }

    match command {
        "disable_output" => {
            sheet.output_enabled = false;
            return CommandStatus::Ok;
        }
        "enable_output" => {
            sheet.output_enabled = true;
            return CommandStatus::Ok;
        }
        _ => {}
    }

    if let Some(name) = command.strip_prefix("scroll_to ") {
        return scroll_to(sheet, name.trim());
    }

    if let Some((target, formula)) = command.split_once('=') {
        return assign(sheet, target.trim(), formula);
    }

    CommandStatus::InvalidCommand
}

/// Renders a viewport-sized window of the grid (spec.md §6), `ERR` for
/// error cells. No-op when output is disabled.
pub fn display_sheet(sheet: &Sheet) {
    if !sheet.output_enabled {
        return;
    }

    let row_end = (sheet.view_row + VIEWPORT).min(sheet.rows);
    let col_end = (sheet.view_col + VIEWPORT).min(sheet.cols);

    print!("    ");
    for col in sheet.view_col..col_end {
        print!("{:>8}", encode_column(col));
    }
    println!();

    for row in sheet.view_row..row_end {
        print!("{:<4}", row + 1);
        for col in sheet.view_col..col_end {
            let cell = sheet.cell(Coord::new(row, col));
            let text = match cell.status {
                CellStatus::Error => "ERR".to_string(),
                CellStatus::Ok => cell.value.to_string(),
            };
            print!("{text:>8}");
        }
        println!();
    }
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_dispatches_to_update_cell() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(process_command(&mut sheet, "A1=5"), CommandStatus::Ok);
        assert_eq!(sheet.cell(Coord::new(0, 0)).value, 5);
    }

    #[test]
    fn malformed_target_is_invalid_cell() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(process_command(&mut sheet, "1A=5"), CommandStatus::InvalidCell);
    }

    #[test]
    fn out_of_grid_target_is_cell_out_of_bounds() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(
            process_command(&mut sheet, "Z1000=5"),
            CommandStatus::CellOutOfBounds
        );
    }

    #[test]
    fn scroll_to_moves_viewport() {
        let mut sheet = Sheet::new(100, 100);
        assert_eq!(process_command(&mut sheet, "scroll_to B2"), CommandStatus::Ok);
        assert_eq!(sheet.view_row, 1);
        assert_eq!(sheet.view_col, 1);
    }

    #[test]
    fn scroll_to_out_of_bounds() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(
            process_command(&mut sheet, "scroll_to Z1000"),
            CommandStatus::CellOutOfBounds
        );
    }

    #[test]
    fn toggling_output() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(process_command(&mut sheet, "disable_output"), CommandStatus::Ok);
        assert!(!sheet.output_enabled);
        assert_eq!(process_command(&mut sheet, "enable_output"), CommandStatus::Ok);
        assert!(sheet.output_enabled);
    }

    #[test]
    fn scroll_keys_move_within_bounds() {
        let mut sheet = Sheet::new(100, 100);
        assert_eq!(process_command(&mut sheet, "s"), CommandStatus::Ok);
        assert_eq!(sheet.view_row, 10);
        assert_eq!(process_command(&mut sheet, "d"), CommandStatus::Ok);
        assert_eq!(sheet.view_col, 10);
        assert_eq!(process_command(&mut sheet, "w"), CommandStatus::Ok);
        assert_eq!(sheet.view_row, 0);
        assert_eq!(process_command(&mut sheet, "a"), CommandStatus::Ok);
        assert_eq!(sheet.view_col, 0);
    }

    #[test]
    fn unrecognized_command_shape() {
        let mut sheet = Sheet::new(10, 10);
        assert_eq!(process_command(&mut sheet, "bogus"), CommandStatus::InvalidCommand);
    }
}
