//! In-memory editor and notifier implementations, used by this crate's own
//! suites and available to host integrations.

use crate::editor::{Editor, Position};
use crate::notify::Notifier;
use std::sync::Mutex;

/// Notifier that records every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

/// Plain text-buffer editor with a cursor and an optional selection.
///
/// Positions past the end of a line clamp to the line break; positions past
/// the end of the buffer clamp to its end.
pub struct BufferEditor {
    text: String,
    cursor: Position,
    selection: Option<(Position, Position)>,
}

impl BufferEditor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: Position::new(0, 0),
            selection: None,
        }
    }

    /// Buffer with an active selection; the cursor sits at the selection end.
    pub fn with_selection(text: impl Into<String>, from: Position, to: Position) -> Self {
        let mut editor = Self::new(text);
        editor.selection = Some((from, to));
        editor.cursor = to;
        editor
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn select(&mut self, from: Position, to: Position) {
        self.selection = Some((from, to));
        self.cursor = to;
    }

    fn offset(&self, pos: Position) -> usize {
        let mut line = 0usize;
        let mut column = 0usize;
        for (idx, ch) in self.text.char_indices() {
            if line == pos.line && column == pos.column {
                return idx;
            }
            if ch == '\n' {
                if line == pos.line {
                    return idx;
                }
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        self.text.len()
    }
}

impl Editor for BufferEditor {
    fn selection(&self) -> String {
        match self.selection {
            Some((from, to)) => {
                let (start, end) = (self.offset(from), self.offset(to));
                self.text[start..end].to_string()
            }
            None => String::new(),
        }
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
    }

    fn replace_selection(&mut self, text: &str) {
        match self.selection.take() {
            Some((from, to)) => {
                let (start, end) = (self.offset(from), self.offset(to));
                self.text.replace_range(start..end, text);
                self.cursor = from;
            }
            None => {
                let at = self.offset(self.cursor);
                self.text.insert_str(at, text);
            }
        }
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>) {
        let start = self.offset(from);
        let end = to.map_or(start, |pos| self.offset(pos));
        self.text.replace_range(start..end, text);
    }
}
