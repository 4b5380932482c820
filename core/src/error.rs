use itertools::Itertools as _;
use thiserror::Error;

use crate::{egt::EntryType, SymbolKind};

/// A rendered list of symbols the parser expected to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSymbols(pub(crate) Vec<String>);

impl std::fmt::Display for ExpectedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().join(", ").fmt(f)
    }
}

impl ExpectedSymbols {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self(symbols.into_iter().map(|s| s.to_string()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("type mismatch in file, expecting {expected} but read '{found}' at {offset}")]
    TypeMismatch {
        expected: EntryType,
        found: EntryType,
        offset: usize,
    },

    #[error("unknown entry type {tag:#04x} at {offset}")]
    UnknownEntryType { tag: u8, offset: usize },

    #[error("a record of type {0:#04x} was read, this is not a valid code")]
    UnknownRecord(u8),

    #[error("unexpected end of file at {offset}")]
    UnexpectedEof { offset: usize },

    #[error("the table counts record must precede every table record")]
    MissingTableCounts,

    #[error("index {index} is out of range for the {table} table ({len} entries)")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    #[error("entry {index} of the {table} table was never defined")]
    MissingEntry { table: &'static str, index: usize },

    #[error("the head of production {0} is not a nonterminal")]
    InvalidProductionHead(usize),

    #[error("the symbol table has no {0:?} symbol")]
    MissingSymbol(SymbolKind),

    #[error("unknown symbol kind {0}")]
    InvalidSymbolKind(u16),

    #[error("unknown LR action {0}")]
    InvalidAction(u16),

    #[error("unknown group advance mode {0}")]
    InvalidAdvanceMode(u16),

    #[error("unknown group ending mode {0}")]
    InvalidEndingMode(u16),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ErrorKind {
    pub fn out_of_range(table: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { table, index, len }
    }
}

/// Failure to load a table file.
///
/// Whatever went wrong while scanning the file is reported as one error,
/// tagged with the byte offset the reader had reached.
#[derive(Error, Debug)]
#[error("error while loading tables: {kind}")]
pub struct TablrError {
    /// Kind of error
    #[source]
    kind: ErrorKind,
    /// Byte offset in the table file.
    pub(crate) offset: Option<usize>,
}

impl TablrError {
    pub fn new(kind: impl Into<ErrorKind>, offset: Option<usize>) -> Self {
        Self {
            kind: kind.into(),
            offset,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl From<ErrorKind> for TablrError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, offset: None }
    }
}

impl From<std::io::Error> for TablrError {
    fn from(err: std::io::Error) -> Self {
        ErrorKind::Io(err).into()
    }
}
