/// Zero-based line/column position in a host document. Columns count
/// characters within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Editing surface of the host document a command was invoked from.
pub trait Editor {
    /// Current selection text, empty when nothing is selected.
    fn selection(&self) -> String;

    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, pos: Position);

    /// Replace the current selection (insert at the cursor when empty).
    fn replace_selection(&mut self, text: &str);

    /// Replace the range `from..to`; insert at `from` when `to` is `None`.
    fn replace_range(&mut self, text: &str, from: Position, to: Option<Position>);
}
