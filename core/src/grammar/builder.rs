use crate::{
    dfa::{CharSetId, CharacterSet, Dfa, DfaStateId, FaState},
    lr::{Action, LrState, LrTable, StateId},
    traits::SymbolSlice as _,
    ErrorKind, Group, GroupId, Production, Symbol, SymbolKind,
};

use super::{Grammar, GrammarProperties};

/// Declared size of every table, the first thing a table file states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub symbols: usize,
    pub charsets: usize,
    pub productions: usize,
    pub dfa_states: usize,
    pub lr_states: usize,
    pub groups: usize,
}

/// A table of fixed size whose entries are defined out of order, by index.
#[derive(Debug)]
struct Slots<T> {
    table: &'static str,
    items: Vec<Option<T>>,
}

impl<T> Slots<T> {
    fn new(table: &'static str, len: usize) -> Self {
        Self {
            table,
            items: std::iter::repeat_with(|| None).take(len).collect(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn check(&self, index: usize) -> Result<(), ErrorKind> {
        if index < self.len() {
            Ok(())
        } else {
            Err(ErrorKind::out_of_range(self.table, index, self.len()))
        }
    }

    fn set(&mut self, index: usize, value: T) -> Result<(), ErrorKind> {
        self.check(index)?;
        self.items[index] = Some(value);
        Ok(())
    }

    /// Every slot must have been filled once loading is over.
    fn finish(self) -> Result<Vec<T>, ErrorKind> {
        let table = self.table;

        self.items
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.ok_or(ErrorKind::MissingEntry { table, index }))
            .collect()
    }
}

/// Assembles a [`Grammar`] from table entries.
///
/// The table counts must be declared before any entry is defined. Cross
/// references between tables are only checked by [`GrammarBuilder::build`],
/// so entries may arrive in any order.
#[derive(Debug)]
pub struct GrammarBuilder {
    properties: GrammarProperties,
    counts: Option<TableCounts>,
    dfa_initial: DfaStateId,
    lr_initial: StateId,
    symbols: Slots<Symbol>,
    charsets: Slots<CharacterSet>,
    productions: Slots<Production>,
    dfa_states: Slots<FaState>,
    lr_states: Slots<LrState>,
    groups: Slots<Group>,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            properties: GrammarProperties::default(),
            counts: None,
            dfa_initial: 0,
            lr_initial: 0,
            symbols: Slots::new("symbol", 0),
            charsets: Slots::new("character set", 0),
            productions: Slots::new("production", 0),
            dfa_states: Slots::new("DFA", 0),
            lr_states: Slots::new("LALR", 0),
            groups: Slots::new("group", 0),
        }
    }

    pub fn property(&mut self, index: usize, value: impl Into<String>) -> &mut Self {
        self.properties.set(index, value);
        self
    }

    /// Declare the size of every table, discarding any entry defined so far.
    pub fn table_counts(&mut self, counts: TableCounts) -> &mut Self {
        self.counts = Some(counts);
        self.symbols = Slots::new("symbol", counts.symbols);
        self.charsets = Slots::new("character set", counts.charsets);
        self.productions = Slots::new("production", counts.productions);
        self.dfa_states = Slots::new("DFA", counts.dfa_states);
        self.lr_states = Slots::new("LALR", counts.lr_states);
        self.groups = Slots::new("group", counts.groups);
        self
    }

    pub fn initial_states(&mut self, dfa: DfaStateId, lr: StateId) -> &mut Self {
        self.dfa_initial = dfa;
        self.lr_initial = lr;
        self
    }

    fn require_counts(&self) -> Result<(), ErrorKind> {
        self.counts.map(|_| ()).ok_or(ErrorKind::MissingTableCounts)
    }

    pub fn symbol(&mut self, symbol: Symbol) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.symbols.set(symbol.id, symbol)?;
        Ok(self)
    }

    pub fn charset(&mut self, index: CharSetId, set: CharacterSet) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.charsets.set(index, set)?;
        Ok(self)
    }

    pub fn production(&mut self, production: Production) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.productions.set(production.id, production)?;
        Ok(self)
    }

    pub fn dfa_state(&mut self, index: DfaStateId, state: FaState) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.dfa_states.set(index, state)?;
        Ok(self)
    }

    pub fn lr_state(&mut self, index: StateId, state: LrState) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.lr_states.set(index, state)?;
        Ok(self)
    }

    pub fn group(&mut self, group: Group) -> Result<&mut Self, ErrorKind> {
        self.require_counts()?;
        self.groups.set(group.id, group)?;
        Ok(self)
    }

    /// Check every table is complete and consistent, then freeze the grammar.
    pub fn build(self) -> Result<Grammar, ErrorKind> {
        let counts = self.counts.ok_or(ErrorKind::MissingTableCounts)?;

        let symbols = self.symbols.finish()?;
        let charsets = self.charsets.finish()?;
        let productions = self.productions.finish()?;
        let dfa_states = self.dfa_states.finish()?;
        let lr_states = self.lr_states.finish()?;
        let groups = self.groups.finish()?;

        let check = |table: &'static str, index: usize, len: usize| {
            if index < len {
                Ok(())
            } else {
                Err(ErrorKind::out_of_range(table, index, len))
            }
        };

        for prod in &productions {
            check("symbol", prod.head, symbols.len())?;
            if symbols[prod.head].kind != SymbolKind::Nonterminal {
                return Err(ErrorKind::InvalidProductionHead(prod.id));
            }
            for sym in &prod.handle {
                check("symbol", *sym, symbols.len())?;
            }
        }

        if !dfa_states.is_empty() {
            check("DFA", self.dfa_initial, dfa_states.len())?;
        }
        for state in &dfa_states {
            if let Some(accept) = state.accept {
                check("symbol", accept, symbols.len())?;
            }
            for edge in &state.edges {
                check("character set", edge.charset, charsets.len())?;
                check("DFA", edge.target, dfa_states.len())?;
            }
        }

        if !lr_states.is_empty() {
            check("LALR", self.lr_initial, lr_states.len())?;
        }
        for state in &lr_states {
            for (sym, action) in state.iter() {
                check("symbol", *sym, symbols.len())?;
                match action {
                    Action::Shift(to) | Action::Goto(to) => check("LALR", *to, lr_states.len())?,
                    Action::Reduce(prod) => check("production", *prod, productions.len())?,
                    Action::Accept | Action::Error => {}
                }
            }
        }

        let special = |kind: SymbolKind| {
            symbols
                .first_of_kind(kind)
                .map(|sym| sym.id)
                .ok_or(ErrorKind::MissingSymbol(kind))
        };
        let end = special(SymbolKind::End)?;
        let error = special(SymbolKind::Error)?;

        // Back links from the group symbols, a later group wins.
        let mut symbol_groups: Vec<Option<GroupId>> = vec![None; symbols.len()];
        for group in &groups {
            for sym in [group.container, group.start, group.end] {
                check("symbol", sym, symbols.len())?;
                symbol_groups[sym] = Some(group.id);
            }
            for nested in &group.nesting {
                check("group", *nested, groups.len())?;
            }
        }

        Ok(Grammar {
            properties: self.properties,
            counts,
            symbols,
            productions,
            dfa: Dfa {
                initial: self.dfa_initial,
                states: dfa_states,
                charsets,
            },
            lr: LrTable {
                initial: self.lr_initial,
                states: lr_states,
            },
            groups,
            symbol_groups,
            end,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::FaEdge;

    fn counts() -> TableCounts {
        TableCounts {
            symbols: 3,
            charsets: 1,
            productions: 0,
            dfa_states: 1,
            lr_states: 1,
            groups: 0,
        }
    }

    #[test]
    fn test_entries_require_table_counts() {
        let mut builder = GrammarBuilder::new();
        let err = builder
            .symbol(Symbol::new(0, "EOF", SymbolKind::End))
            .unwrap_err();
        assert!(matches!(err, ErrorKind::MissingTableCounts));
    }

    #[test]
    fn test_out_of_order_entries() {
        let mut builder = GrammarBuilder::new();
        builder.table_counts(counts());
        builder
            .symbol(Symbol::new(1, "a", SymbolKind::Terminal))
            .unwrap()
            .symbol(Symbol::new(0, "EOF", SymbolKind::End))
            .unwrap()
            .symbol(Symbol::new(2, "Error", SymbolKind::Error))
            .unwrap()
            .charset(0, CharacterSet::new())
            .unwrap()
            .dfa_state(0, FaState::new(None, vec![FaEdge::new(0, 0)]))
            .unwrap()
            .lr_state(0, LrState::new([(0, Action::Accept)]))
            .unwrap();

        let grammar = builder.build().unwrap();
        assert_eq!(grammar.symbols()[0].name, "EOF");
        assert_eq!(grammar.symbols()[1].name, "a");
        assert_eq!(grammar.error_symbol().name, "Error");
    }

    #[test]
    fn test_missing_entry() {
        let mut builder = GrammarBuilder::new();
        builder.table_counts(counts());
        builder
            .symbol(Symbol::new(0, "EOF", SymbolKind::End))
            .unwrap();

        let err = builder.build().unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::MissingEntry {
                table: "symbol",
                index: 1
            }
        ));
    }

    #[test]
    fn test_index_beyond_declared_count() {
        let mut builder = GrammarBuilder::new();
        builder.table_counts(counts());
        let err = builder
            .symbol(Symbol::new(3, "b", SymbolKind::Terminal))
            .unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::IndexOutOfRange {
                index: 3,
                len: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_error_symbol() {
        let mut builder = GrammarBuilder::new();
        builder.table_counts(TableCounts {
            symbols: 1,
            ..TableCounts::default()
        });
        builder
            .symbol(Symbol::new(0, "EOF", SymbolKind::End))
            .unwrap();

        assert!(matches!(
            builder.build().unwrap_err(),
            ErrorKind::MissingSymbol(SymbolKind::Error)
        ));
    }

    #[test]
    fn test_dangling_edge_target() {
        let mut builder = GrammarBuilder::new();
        builder.table_counts(counts());
        builder
            .symbol(Symbol::new(0, "EOF", SymbolKind::End))
            .unwrap()
            .symbol(Symbol::new(1, "a", SymbolKind::Terminal))
            .unwrap()
            .symbol(Symbol::new(2, "Error", SymbolKind::Error))
            .unwrap()
            .charset(0, CharacterSet::new())
            .unwrap()
            .dfa_state(0, FaState::new(None, vec![FaEdge::new(0, 3)]))
            .unwrap()
            .lr_state(0, LrState::default())
            .unwrap();

        assert!(matches!(
            builder.build().unwrap_err(),
            ErrorKind::IndexOutOfRange { table: "DFA", .. }
        ));
    }
}
