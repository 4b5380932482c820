use std::ops::{Add, AddAssign};

/// A line/column location in the source text, both 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Advance over one consumed character.
    ///
    /// A line feed starts a new line, a carriage return is ignored.
    pub fn advance(&mut self, ch: char) {
        match ch {
            '\n' => *self += NextLine,
            '\r' => {}
            _ => *self += NextColumn,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

pub struct NextLine;
pub struct NextColumn;

impl Add<NextLine> for Position {
    type Output = Self;

    fn add(mut self, rhs: NextLine) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<NextColumn> for Position {
    type Output = Self;

    fn add(mut self, rhs: NextColumn) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<NextLine> for Position {
    fn add_assign(&mut self, _: NextLine) {
        self.column = 0;
        self.line += 1;
    }
}

impl AddAssign<NextColumn> for Position {
    fn add_assign(&mut self, _: NextColumn) {
        self.column += 1;
    }
}
