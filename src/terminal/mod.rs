use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthChar;

use crate::config::Settings;
use crate::editor::Snapshot;

/// Columns a tab occupies on screen
const TAB_WIDTH: usize = 4;

/// Terminal handler responsible for rendering
pub struct Terminal {
    stdout: Stdout,
    /// First document row shown on screen
    viewport_offset: usize,
    width: u16,
    height: u16,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();

        // Enter raw mode and alternate screen
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, EnableBracketedPaste)?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            viewport_offset: 0,
            width,
            height,
        })
    }

    /// Record a new terminal size
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Paint one frame from an editor snapshot
    pub fn render(&mut self, snapshot: &Snapshot, settings: &Settings) -> anyhow::Result<()> {
        let text_rows = self.height as usize;
        self.viewport_offset = scroll_to_cursor(self.viewport_offset, snapshot.cursor_row, text_rows);

        let gutter = if settings.editor.line_numbers {
            gutter_width(snapshot.lines.len())
        } else {
            0
        };
        let text_width = (self.width as usize).saturating_sub(gutter);

        queue!(self.stdout, cursor::Hide, cursor::MoveTo(0, 0))?;
        for screen_row in 0..text_rows {
            let doc_row = self.viewport_offset + screen_row;
            queue!(
                self.stdout,
                cursor::MoveTo(0, screen_row as u16),
                terminal::Clear(ClearType::CurrentLine)
            )?;

            let Some(line) = snapshot.lines.get(doc_row) else {
                queue!(self.stdout, SetForegroundColor(Color::DarkGrey), Print("~"), ResetColor)?;
                continue;
            };

            if gutter > 0 {
                let color = if doc_row == snapshot.cursor_row {
                    Color::Yellow
                } else {
                    Color::DarkGrey
                };
                queue!(
                    self.stdout,
                    SetForegroundColor(color),
                    Print(format!("{:>width$} ", doc_row + 1, width = gutter - 1)),
                    ResetColor
                )?;
            }
            queue!(self.stdout, Print(visible_text(line, text_width)))?;
        }

        let line = snapshot
            .lines
            .get(snapshot.cursor_row)
            .map(String::as_str)
            .unwrap_or("");
        let x = cursor_x(gutter, display_col(line, snapshot.cursor_col), self.width);
        let y = snapshot.cursor_row - self.viewport_offset;
        queue!(self.stdout, cursor::MoveTo(x, y as u16), cursor::Show)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = execute!(
            self.stdout,
            DisableBracketedPaste,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Keep the cursor row inside the visible window
fn scroll_to_cursor(offset: usize, cursor_row: usize, text_rows: usize) -> usize {
    if text_rows == 0 {
        return cursor_row;
    }
    if cursor_row < offset {
        cursor_row
    } else if cursor_row >= offset + text_rows {
        cursor_row + 1 - text_rows
    } else {
        offset
    }
}

/// Screen column for the hardware cursor, kept on screen for truncated lines
fn cursor_x(gutter: usize, col: usize, screen_width: u16) -> u16 {
    let max_x = (screen_width as usize).saturating_sub(1);
    (gutter + col).min(max_x).min(u16::MAX as usize) as u16
}

/// Width of the line-number column including its trailing space
fn gutter_width(rows: usize) -> usize {
    rows.to_string().len().max(3) + 1
}

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Screen column of a caret position within a line
fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Line text as painted: tabs expanded, cut to the available width
fn visible_text(line: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = char_width(ch);
        if used + w > max_width {
            break;
        }
        used += w;
        if ch == '\t' {
            out.extend(std::iter::repeat(' ').take(TAB_WIDTH));
        } else {
            out.push(ch);
        }
    }
    out
}
