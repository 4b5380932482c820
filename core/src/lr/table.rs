use prettytable::Table as PtTable;

use crate::{Symbol, SymbolId};

use super::{Action, StateId};

/// One row of the LALR automaton: at most one action per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LrState {
    actions: Vec<(SymbolId, Action)>,
}

impl LrState {
    pub fn new<A>(actions: A) -> Self
    where
        A: IntoIterator<Item = (SymbolId, Action)>,
    {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, symbol: SymbolId, action: Action) {
        self.actions.push((symbol, action))
    }

    pub fn action(&self, symbol: SymbolId) -> Option<&Action> {
        self.actions
            .iter()
            .find(|(sym, _)| *sym == symbol)
            .map(|(_, action)| action)
    }

    /// Target state of the goto entry for a nonterminal.
    pub fn goto(&self, symbol: SymbolId) -> Option<StateId> {
        match self.action(symbol)? {
            Action::Goto(to) | Action::Shift(to) => Some(*to),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SymbolId, Action)> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LrTable {
    pub initial: StateId,
    pub states: Vec<LrState>,
}

impl LrTable {
    pub fn state(&self, id: StateId) -> Option<&LrState> {
        self.states.get(id)
    }

    pub fn action(&self, state: StateId, symbol: SymbolId) -> Option<&Action> {
        self.states.get(state).and_then(|row| row.action(symbol))
    }

    pub fn goto(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.states.get(state).and_then(|row| row.goto(symbol))
    }

    /// The number of rows in the table.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Render the table as a grid, one column per symbol.
    pub fn display<'a>(&'a self, symbols: &'a [Symbol]) -> DisplayLrTable<'a> {
        DisplayLrTable {
            table: self,
            symbols,
        }
    }
}

pub struct DisplayLrTable<'a> {
    table: &'a LrTable,
    symbols: &'a [Symbol],
}

impl std::fmt::Display for DisplayLrTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = PtTable::new();

        // Terminals first, then nonterminals, like a classic action/goto grid.
        let columns: Vec<&Symbol> = self
            .symbols
            .iter()
            .filter(|sym| !sym.is_nonterminal())
            .chain(self.symbols.iter().filter(|sym| sym.is_nonterminal()))
            .collect();

        table.add_row(
            ["#".to_owned()]
                .into_iter()
                .chain(columns.iter().map(|sym| sym.to_string()))
                .collect(),
        );

        for (id, row) in self.table.states.iter().enumerate() {
            table.add_row(
                [id.to_string()]
                    .into_iter()
                    .chain(columns.iter().map(|sym| {
                        row.action(sym.id)
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    }))
                    .collect(),
            );
        }

        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SymbolKind;

    #[test]
    fn test_action_lookup() {
        let row = LrState::new([(0, Action::Accept), (1, Action::Shift(5)), (2, Action::Goto(3))]);

        assert_eq!(row.action(1), Some(&Action::Shift(5)));
        assert_eq!(row.goto(2), Some(3));
        assert_eq!(row.goto(0), None);
        assert_eq!(row.action(7), None);
    }

    #[test]
    fn test_display_table() {
        let symbols = vec![
            Symbol::new(0, "EOF", SymbolKind::End),
            Symbol::new(1, "a", SymbolKind::Terminal),
            Symbol::new(2, "S", SymbolKind::Nonterminal),
        ];
        let table = LrTable {
            initial: 0,
            states: vec![
                LrState::new([(1, Action::Shift(2)), (2, Action::Goto(1))]),
                LrState::new([(0, Action::Accept)]),
                LrState::new([(0, Action::Reduce(0))]),
            ],
        };

        let rendered = table.display(&symbols).to_string();
        println!("{}", rendered);
        assert!(rendered.contains("<S>"));
        assert!(rendered.contains("acc"));
        assert!(rendered.contains("r0"));
    }
}
