//! Cursor movement for keyboard navigation over the card grid.

use crossterm::event::KeyCode;

/// Cards per row on the board.
pub const GRID_COLUMNS: usize = 4;

/// Moves the cursor over a row-major grid of `len` cards.
///
/// Moves that would leave the grid keep the cursor where it is.
pub fn move_cursor(cursor: usize, len: usize, key: KeyCode) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    let column = cursor % GRID_COLUMNS;

    let next = match key {
        KeyCode::Left if column > 0 => cursor - 1,
        KeyCode::Right if column + 1 < GRID_COLUMNS => cursor + 1,
        KeyCode::Up if cursor >= GRID_COLUMNS => cursor - GRID_COLUMNS,
        KeyCode::Down => cursor + GRID_COLUMNS,
        _ => cursor,
    };

    if next < len { next } else { cursor }
}
