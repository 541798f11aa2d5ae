use serde::Deserialize;

use super::buffer::Buffer;

/// Cursor position in the buffer (0-indexed)
///
/// `col` is a caret position: it may equal the line width, meaning
/// "just past the last character".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Row number (0-indexed)
    pub row: usize,
    /// Column number (0-indexed, in chars)
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// What `Up` does when the cursor is already on the first row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopRowPolicy {
    /// Snap the column to 0
    #[default]
    ClampToStart,
    /// Leave the cursor where it is
    KeepColumn,
}

/// The parts of a buffer's geometry the cursor policy looks at
pub trait LineShape {
    /// Number of rows, at least 1
    fn rows(&self) -> usize;
    /// Width of a row that is known to exist
    fn width(&self, row: usize) -> usize;
}

impl LineShape for Buffer {
    fn rows(&self) -> usize {
        self.row_count()
    }

    /// Callers only pass rows of a position that is valid for this buffer,
    /// or `row - 1` / `row + 1` after checking against `rows()`.
    fn width(&self, row: usize) -> usize {
        debug_assert!(row < self.row_count(), "row {row} outside buffer shape");
        self.width_at(row).unwrap_or(0)
    }
}

/// A shape given directly as per-row widths
impl LineShape for [usize] {
    fn rows(&self) -> usize {
        self.len()
    }

    fn width(&self, row: usize) -> usize {
        self.get(row).copied().unwrap_or(0)
    }
}

/// Cursor motions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
}

/// Find the position after applying a motion
pub fn apply_motion<S: LineShape + ?Sized>(
    shape: &S,
    cursor: Cursor,
    motion: Motion,
    top_row: TopRowPolicy,
) -> Cursor {
    match motion {
        Motion::Left => move_left(shape, cursor),
        Motion::Right => move_right(shape, cursor),
        Motion::Up => move_up(shape, cursor, top_row),
        Motion::Down => move_down(shape, cursor),
    }
}

pub fn move_right<S: LineShape + ?Sized>(shape: &S, cursor: Cursor) -> Cursor {
    let width = shape.width(cursor.row);
    let last_row = shape.rows().saturating_sub(1);

    if cursor.col == width && cursor.row == last_row {
        // End of text
        cursor
    } else if cursor.col == width {
        Cursor::new(cursor.row + 1, 0)
    } else {
        Cursor::new(cursor.row, cursor.col + 1)
    }
}

pub fn move_left<S: LineShape + ?Sized>(shape: &S, cursor: Cursor) -> Cursor {
    if cursor.row == 0 && cursor.col == 0 {
        cursor
    } else if cursor.col == 0 {
        let row = cursor.row - 1;
        Cursor::new(row, shape.width(row))
    } else {
        Cursor::new(cursor.row, cursor.col - 1)
    }
}

pub fn move_up<S: LineShape + ?Sized>(shape: &S, cursor: Cursor, top_row: TopRowPolicy) -> Cursor {
    if cursor.row == 0 {
        return match top_row {
            TopRowPolicy::ClampToStart => Cursor::new(0, 0),
            TopRowPolicy::KeepColumn => cursor,
        };
    }

    let row = cursor.row - 1;
    Cursor::new(row, cursor.col.min(shape.width(row)))
}

pub fn move_down<S: LineShape + ?Sized>(shape: &S, cursor: Cursor) -> Cursor {
    if cursor.row == shape.rows().saturating_sub(1) {
        return Cursor::new(cursor.row, shape.width(cursor.row));
    }

    let row = cursor.row + 1;
    Cursor::new(row, cursor.col.min(shape.width(row)))
}

/// Pull a cursor back inside the shape after the shape changed under it
pub fn clamp<S: LineShape + ?Sized>(shape: &S, cursor: Cursor) -> Cursor {
    let row = cursor.row.min(shape.rows().saturating_sub(1));
    Cursor::new(row, cursor.col.min(shape.width(row)))
}
