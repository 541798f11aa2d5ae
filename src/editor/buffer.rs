use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Errors raised when a caller hands the buffer an index outside its current shape.
///
/// This is the buffer's single out-of-bounds error class: row and column
/// violations are separate variants, and `SoleLine` is a row that cannot be
/// removed without leaving zero lines. The buffer never clamps; a failed call
/// leaves the content untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("row {row} out of bounds (buffer has {rows} rows)")]
    RowOutOfBounds { row: usize, rows: usize },
    #[error("column {col} out of bounds on row {row} (width {width})")]
    ColOutOfBounds { row: usize, col: usize, width: usize },
    #[error("cannot remove the only line of the buffer")]
    SoleLine,
}

pub type Result<T> = std::result::Result<T, BufferError>;

/// Outcome of a backspace at some position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// Start of document, nothing removed
    Nothing,
    /// A single character was removed from the line
    Char(char),
    /// The line was merged onto the previous one; `col` is the merge point
    Joined { col: usize },
}

/// A text buffer stored as a grid of lines.
///
/// Lines never contain `'\n'`; line breaks are the boundaries between entries.
/// There is always at least one line: an empty document is one empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Vec<char>>,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    /// Build a buffer by splitting on every `'\n'`
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|l| l.chars().collect()).collect(),
        }
    }

    /// Join all lines with `'\n'`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                out.push('\n');
            }
            out.extend(line.iter());
        }
        out
    }

    /// Get total number of lines (always >= 1)
    pub fn row_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the number of chars in a line
    pub fn width_at(&self, row: usize) -> Result<usize> {
        self.check_row(row)?;
        Ok(self.lines[row].len())
    }

    /// Widest line in the buffer
    pub fn max_width(&self) -> usize {
        self.lines.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Narrowest line in the buffer
    pub fn min_width(&self) -> usize {
        self.lines.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// True if `(row, col)` addresses an existing character
    pub fn is_valid_char_pos(&self, row: usize, col: usize) -> bool {
        row < self.lines.len() && col < self.lines[row].len()
    }

    /// True if `(row, col)` is a caret position, end of line included
    pub fn is_valid_cursor_pos(&self, row: usize, col: usize) -> bool {
        row < self.lines.len() && col <= self.lines[row].len()
    }

    /// Copy of a single line
    pub fn line(&self, row: usize) -> Result<String> {
        self.check_row(row)?;
        Ok(self.lines[row].iter().collect())
    }

    /// Get the character at a position
    pub fn char_at(&self, row: usize, col: usize) -> Result<char> {
        let width = self.width_at(row)?;
        if col >= width {
            return Err(BufferError::ColOutOfBounds { row, col, width });
        }
        Ok(self.lines[row][col])
    }

    /// Deep copy of the line grid
    pub fn lines(&self) -> Vec<Vec<char>> {
        self.lines.clone()
    }

    /// Replace the whole grid. An empty grid becomes one empty line, and a
    /// row holding `'\n'` is split into several lines.
    pub fn set_lines(&mut self, lines: Vec<Vec<char>>) {
        self.lines = lines
            .into_iter()
            .flat_map(|line| {
                line.split(|&c| c == '\n')
                    .map(<[char]>::to_vec)
                    .collect::<Vec<_>>()
            })
            .collect();
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        debug!(rows = self.lines.len(), "buffer content replaced");
    }

    /// Lines as owned strings, for renderers
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.iter().collect()).collect()
    }

    /// Insert an empty line so it becomes index `row`. `row == row_count()` appends.
    pub fn insert_line_at(&mut self, row: usize) -> Result<()> {
        if row > self.lines.len() {
            return Err(BufferError::RowOutOfBounds {
                row,
                rows: self.lines.len(),
            });
        }
        self.lines.insert(row, Vec::new());
        debug!(row, "line inserted");
        Ok(())
    }

    /// Append an empty line at the end
    pub fn push_line(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Remove the line at `row` and return its content
    pub fn remove_line_at(&mut self, row: usize) -> Result<Vec<char>> {
        self.check_row(row)?;
        if self.lines.len() == 1 {
            return Err(BufferError::SoleLine);
        }
        debug!(row, "line removed");
        Ok(self.lines.remove(row))
    }

    /// Insert a character at the given caret position.
    ///
    /// `'\n'` is never stored; it splits the line at `col` instead.
    pub fn insert_char_at(&mut self, row: usize, col: usize, ch: char) -> Result<()> {
        if ch == '\n' {
            return self.split_line_at(row, col);
        }
        self.check_cursor(row, col)?;
        self.lines[row].insert(col, ch);
        Ok(())
    }

    /// Append a character at the end of a line
    pub fn push_char(&mut self, row: usize, ch: char) -> Result<()> {
        let width = self.width_at(row)?;
        self.insert_char_at(row, width, ch)
    }

    /// Insert a string at the given caret position.
    ///
    /// Each `'\n'` in `text` splits the line. Returns the caret position just
    /// past the inserted text.
    pub fn insert_str_at(&mut self, row: usize, col: usize, text: &str) -> Result<(usize, usize)> {
        self.check_cursor(row, col)?;

        let tail = self.lines[row].split_off(col);
        let mut segments = text.split('\n');
        // split always yields at least one segment
        if let Some(first) = segments.next() {
            self.lines[row].extend(first.chars());
        }

        let mut end_row = row;
        for segment in segments {
            end_row += 1;
            self.lines.insert(end_row, segment.chars().collect());
        }

        let end_col = self.lines[end_row].len();
        self.lines[end_row].extend(tail);
        if end_row != row {
            debug!(row, added = end_row - row, "multi-line insert");
        }
        Ok((end_row, end_col))
    }

    /// Append a string at the end of a line, splitting on `'\n'`
    pub fn push_str(&mut self, row: usize, text: &str) -> Result<(usize, usize)> {
        let width = self.width_at(row)?;
        self.insert_str_at(row, width, text)
    }

    /// Delete the character before `(row, col)` (backspace semantics)
    pub fn delete_char_before(&mut self, row: usize, col: usize) -> Result<Deletion> {
        self.check_cursor(row, col)?;

        if row == 0 && col == 0 {
            return Ok(Deletion::Nothing);
        }

        // At the start of a line, join with the previous line
        if col == 0 {
            return match self.join_line_up(row)? {
                Some(col) => Ok(Deletion::Joined { col }),
                None => Ok(Deletion::Nothing),
            };
        }

        Ok(Deletion::Char(self.lines[row].remove(col - 1)))
    }

    /// Split line `row` at `col`; the suffix becomes line `row + 1`
    pub fn split_line_at(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_cursor(row, col)?;
        let rest = self.lines[row].split_off(col);
        self.lines.insert(row + 1, rest);
        debug!(row, col, "line split");
        Ok(())
    }

    /// Merge line `row` onto the end of line `row - 1`.
    ///
    /// Returns the merge column, or `None` when `row == 0` (nothing above to join).
    pub fn join_line_up(&mut self, row: usize) -> Result<Option<usize>> {
        self.check_row(row)?;
        if row == 0 {
            return Ok(None);
        }

        let current = self.lines.remove(row);
        let prev = &mut self.lines[row - 1];
        let merge_col = prev.len();
        prev.extend(current);
        debug!(row, merge_col, "line joined up");
        Ok(Some(merge_col))
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.lines.len() {
            return Err(BufferError::RowOutOfBounds {
                row,
                rows: self.lines.len(),
            });
        }
        Ok(())
    }

    fn check_cursor(&self, row: usize, col: usize) -> Result<()> {
        let width = self.width_at(row)?;
        if col > width {
            return Err(BufferError::ColOutOfBounds { row, col, width });
        }
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
