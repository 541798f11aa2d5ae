mod buffer;
mod cursor;

pub use buffer::{Buffer, BufferError, Deletion};
pub use cursor::{apply_motion, clamp, Cursor, LineShape, Motion, TopRowPolicy};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::EditorSettings;

/// An editing or navigation request, applied atomically by [`Editor::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    TypeChar(char),
    Backspace,
    Enter,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Bracketed paste; newlines in the text become line breaks
    Paste(String),
    /// Terminal size changed. The core has no viewport, so this is a no-op.
    Resize { width: u16, height: u16 },
}

/// Everything a renderer needs to paint one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor_row: usize,
    pub cursor_col: usize,
}

/// A single buffer plus the caret that edits it.
///
/// After every call the cursor is a valid caret position of the buffer's
/// current shape.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    buffer: Buffer,
    cursor: Cursor,
    top_row: TopRowPolicy,
}

impl Editor {
    /// Empty document, cursor at (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self {
            top_row: settings.top_row_up,
            ..Self::default()
        }
    }

    /// Read access to the buffer for queries
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn top_row_policy(&self) -> TopRowPolicy {
        self.top_row
    }

    /// Replace the document and reset the cursor
    pub fn load_text(&mut self, text: &str) {
        self.buffer = Buffer::from_text(text);
        self.cursor = Cursor::default();
        debug!(rows = self.buffer.row_count(), "text loaded");
    }

    /// Replace the line grid, keeping the cursor as close as the new shape allows
    pub fn set_lines(&mut self, lines: Vec<Vec<char>>) {
        self.buffer.set_lines(lines);
        self.cursor = clamp(&self.buffer, self.cursor);
    }

    pub fn dump_text(&self) -> String {
        self.buffer.to_text()
    }

    /// Place the cursor at an explicit caret position
    pub fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), BufferError> {
        let width = self.buffer.width_at(row)?;
        if col > width {
            return Err(BufferError::ColOutOfBounds { row, col, width });
        }
        self.cursor = Cursor::new(row, col);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.buffer.snapshot(),
            cursor_row: self.cursor.row,
            cursor_col: self.cursor.col,
        }
    }

    /// Apply one intent to completion.
    ///
    /// The buffer validates before it mutates, so on error neither the buffer
    /// nor the cursor has changed.
    pub fn apply(&mut self, intent: Intent) -> Result<(), BufferError> {
        let result = self.dispatch(&intent);
        match &result {
            Ok(()) => debug!(?intent, row = self.cursor.row, col = self.cursor.col, "intent applied"),
            Err(e) => warn!(?intent, error = %e, "intent rejected"),
        }
        result
    }

    fn dispatch(&mut self, intent: &Intent) -> Result<(), BufferError> {
        let Cursor { row, col } = self.cursor;

        match intent {
            Intent::TypeChar('\n') => self.dispatch(&Intent::Enter),
            Intent::TypeChar(ch) => {
                self.buffer.insert_char_at(row, col, *ch)?;
                self.cursor.col += 1;
                Ok(())
            }
            Intent::Backspace => {
                match self.buffer.delete_char_before(row, col)? {
                    Deletion::Nothing => {}
                    Deletion::Char(_) => self.cursor.col -= 1,
                    Deletion::Joined { col } => self.cursor = Cursor::new(row - 1, col),
                }
                Ok(())
            }
            Intent::Enter => {
                self.buffer.split_line_at(row, col)?;
                self.cursor = Cursor::new(row + 1, 0);
                Ok(())
            }
            Intent::Paste(text) => {
                let (row, col) = self.buffer.insert_str_at(row, col, text)?;
                self.cursor = Cursor::new(row, col);
                Ok(())
            }
            Intent::Resize { width, height } => {
                trace!(width, height, "resize ignored by core");
                Ok(())
            }
            Intent::MoveUp => self.move_cursor(Motion::Up),
            Intent::MoveDown => self.move_cursor(Motion::Down),
            Intent::MoveLeft => self.move_cursor(Motion::Left),
            Intent::MoveRight => self.move_cursor(Motion::Right),
        }
    }

    fn move_cursor(&mut self, motion: Motion) -> Result<(), BufferError> {
        let next = apply_motion(&self.buffer, self.cursor, motion, self.top_row);
        trace!(?motion, from = ?self.cursor, to = ?next, "cursor moved");
        self.cursor = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str, row: usize, col: usize) -> Editor {
        let mut editor = Editor::new();
        editor.load_text(text);
        editor.set_cursor(row, col).unwrap();
        editor
    }

    fn type_str(editor: &mut Editor, s: &str) {
        for ch in s.chars() {
            editor.apply(Intent::TypeChar(ch)).unwrap();
        }
    }

    #[test]
    fn test_type_advances_cursor() {
        let mut editor = Editor::new();
        type_str(&mut editor, "Hi");
        assert_eq!(editor.dump_text(), "Hi");
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_type_newline_char_splits() {
        let mut editor = Editor::new();
        type_str(&mut editor, "a\nb");
        assert_eq!(editor.dump_text(), "a\nb");
        assert_eq!(editor.cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn test_backspace_within_line() {
        let mut editor = editor_with("abc", 0, 2);
        editor.apply(Intent::Backspace).unwrap();
        assert_eq!(editor.dump_text(), "ac");
        assert_eq!(editor.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_backspace_merges_lines() {
        let mut editor = editor_with("ab\n\ncd", 2, 0);
        editor.apply(Intent::Backspace).unwrap();
        assert_eq!(editor.dump_text(), "ab\ncd");
        assert_eq!(editor.cursor(), Cursor::new(1, 0));

        editor.apply(Intent::Backspace).unwrap();
        assert_eq!(editor.dump_text(), "abcd");
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_enter_at_end_of_line() {
        let mut editor = editor_with("ab", 0, 2);
        editor.apply(Intent::Enter).unwrap();
        assert_eq!(editor.snapshot().lines, vec!["ab", ""]);
        assert_eq!(editor.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_paste_moves_past_text() {
        let mut editor = editor_with("ad", 0, 1);
        editor.apply(Intent::Paste("b\nc".to_string())).unwrap();
        assert_eq!(editor.dump_text(), "ab\ncd");
        assert_eq!(editor.cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn test_resize_is_noop() {
        let mut editor = editor_with("ab\ncd", 1, 1);
        let before = editor.snapshot();
        editor.apply(Intent::Resize { width: 10, height: 3 }).unwrap();
        assert_eq!(editor.snapshot(), before);
    }

    #[test]
    fn test_keep_column_policy() {
        let settings = EditorSettings {
            top_row_up: TopRowPolicy::KeepColumn,
            ..EditorSettings::default()
        };
        let mut editor = Editor::from_settings(&settings);
        editor.load_text("abc");
        editor.set_cursor(0, 2).unwrap();
        editor.apply(Intent::MoveUp).unwrap();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_set_cursor_rejects_invalid() {
        let mut editor = editor_with("ab\ncd", 1, 1);
        assert_eq!(
            editor.set_cursor(0, 3),
            Err(BufferError::ColOutOfBounds { row: 0, col: 3, width: 2 })
        );
        assert!(editor.set_cursor(2, 0).is_err());
        assert_eq!(editor.cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn test_load_text_resets_cursor() {
        let mut editor = editor_with("abc\ndef", 1, 3);
        editor.load_text("x");
        assert_eq!(editor.cursor(), Cursor::default());
    }

    #[test]
    fn test_set_lines_clamps_cursor() {
        let mut editor = editor_with("abcdef\nghi", 1, 3);
        editor.set_lines(vec!["xy".chars().collect()]);
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        assert_eq!(editor.dump_text(), "xy");
    }

    #[test]
    fn test_set_lines_with_newline_keeps_rows_whole() {
        let mut editor = editor_with("abc", 0, 3);
        editor.set_lines(vec!["a\nb".chars().collect()]);
        assert_eq!(editor.buffer().row_count(), 2);
        assert_eq!(editor.snapshot().lines, vec!["a", "b"]);
        assert_eq!(editor.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_arrow_intents_follow_policy() {
        let mut editor = editor_with("ab\ncde", 1, 3);
        editor.apply(Intent::MoveUp).unwrap();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        editor.apply(Intent::MoveRight).unwrap();
        assert_eq!(editor.cursor(), Cursor::new(1, 0));
        editor.apply(Intent::MoveLeft).unwrap();
        assert_eq!(editor.cursor(), Cursor::new(0, 2));
        editor.apply(Intent::MoveDown).unwrap();
        assert_eq!(editor.cursor(), Cursor::new(1, 2));
    }

    #[test]
    fn test_snapshot_reports_cursor() {
        let editor = editor_with("ab\ncd", 1, 2);
        let snap = editor.snapshot();
        assert_eq!(snap.lines, vec!["ab", "cd"]);
        assert_eq!((snap.cursor_row, snap.cursor_col), (1, 2));
    }
}
