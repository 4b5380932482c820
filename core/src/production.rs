use itertools::Itertools as _;

use crate::{Symbol, SymbolId, SymbolKind};

/// The production's index in the production table.
pub type ProductionId = usize;

/// A grammar rule: `head ::= handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub id: ProductionId,
    /// Always a nonterminal.
    pub head: SymbolId,
    /// Body symbols, possibly empty.
    pub handle: Vec<SymbolId>,
}

impl Production {
    pub fn new(id: ProductionId, head: SymbolId, handle: Vec<SymbolId>) -> Self {
        Self { id, head, handle }
    }

    pub fn len(&self) -> usize {
        self.handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_empty()
    }

    /// Is the body made of exactly one nonterminal ?
    ///
    /// Such productions can be trimmed from the parse tree.
    pub fn contains_one_nonterminal(&self, symbols: &[Symbol]) -> bool {
        match self.handle.as_slice() {
            [single] => symbols
                .get(*single)
                .is_some_and(|sym| sym.kind == SymbolKind::Nonterminal),
            _ => false,
        }
    }

    /// Render the production as `<Head> ::= a <B> c`.
    pub fn text(&self, symbols: &[Symbol], always_delimit: bool) -> String {
        let head = symbols
            .get(self.head)
            .map(|sym| sym.text(always_delimit))
            .unwrap_or_default();

        let handle = self
            .handle
            .iter()
            .filter_map(|id| symbols.get(*id))
            .map(|sym| sym.text(always_delimit))
            .join(" ");

        format!("{head} ::= {handle}")
    }
}
