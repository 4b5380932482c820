use crate::ErrorKind;

/// The symbol's index in the symbol table.
pub type SymbolId = usize;

/// Class of a grammar symbol, as encoded in the table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Nonterminal = 0,
    Terminal = 1,
    /// Recognized by the lexer but ignored by the parser (whitespace, comments).
    Noise = 2,
    /// End of the input stream.
    End = 3,
    GroupStart = 4,
    GroupEnd = 5,
    // There is no kind 6, it was used by the deprecated line comments.
    Error = 7,
}

impl SymbolKind {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Can the parser expect a symbol of this kind as its lookahead ?
    pub fn is_expectable(self) -> bool {
        matches!(
            self,
            Self::Terminal | Self::End | Self::GroupStart | Self::GroupEnd
        )
    }
}

impl TryFrom<u16> for SymbolKind {
    type Error = ErrorKind;

    fn try_from(value: u16) -> Result<Self, ErrorKind> {
        Ok(match value {
            0 => Self::Nonterminal,
            1 => Self::Terminal,
            2 => Self::Noise,
            3 => Self::End,
            4 => Self::GroupStart,
            5 => Self::GroupEnd,
            7 => Self::Error,
            _ => return Err(ErrorKind::InvalidSymbolKind(value)),
        })
    }
}

/// Defines a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Index of the symbol in the symbol table.
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new<S: ToString>(id: SymbolId, name: S, kind: SymbolKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn is_nonterminal(&self) -> bool {
        self.kind == SymbolKind::Nonterminal
    }

    /// Render the symbol the way it would be written in a grammar.
    ///
    /// Terminals are quoted when needed, or always if `always_delimit` is set.
    pub fn text(&self, always_delimit: bool) -> String {
        match self.kind {
            SymbolKind::Nonterminal => format!("<{}>", self.name),
            SymbolKind::Terminal => format_literal(&self.name, always_delimit),
            _ => format!("({})", self.name),
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text(false))
    }
}

fn format_literal(source: &str, force_delimit: bool) -> String {
    if source == "'" {
        return "''".to_owned();
    }

    let delimit = force_delimit
        || source
            .chars()
            .any(|ch| !(ch.is_alphabetic() || matches!(ch, '.' | '_' | '-')));

    if delimit {
        format!("'{source}'")
    } else {
        source.to_owned()
    }
}

pub mod traits {
    use super::{Symbol, SymbolKind};

    pub trait SymbolSlice {
        fn as_symbol_slice(&self) -> &[Symbol];

        /// First symbol of the given kind, in table order.
        fn first_of_kind(&self, kind: SymbolKind) -> Option<&Symbol> {
            self.as_symbol_slice().iter().find(|sym| sym.kind == kind)
        }

        fn find_by_name(&self, name: &str) -> Option<&Symbol> {
            self.as_symbol_slice().iter().find(|sym| sym.name == name)
        }

        fn iter_terminals<'a>(&'a self) -> impl Iterator<Item = &'a Symbol> + 'a {
            self.as_symbol_slice().iter().filter(|sym| sym.is_terminal())
        }

        fn iter_non_terminals<'a>(&'a self) -> impl Iterator<Item = &'a Symbol> + 'a {
            self.as_symbol_slice()
                .iter()
                .filter(|sym| sym.is_nonterminal())
        }
    }

    impl<T> SymbolSlice for T
    where
        T: AsRef<[Symbol]>,
    {
        fn as_symbol_slice(&self) -> &[Symbol] {
            self.as_ref()
        }
    }
}
