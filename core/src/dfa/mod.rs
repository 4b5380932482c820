/*!
  Deterministic finite automaton (DFA) driving the lexer.
*/
use crate::SymbolId;

pub mod charset;

pub use charset::{CharSetId, CharacterRange, CharacterSet};

/// The state's index in the DFA table.
pub type DfaStateId = usize;

/// A transition taken when the next character belongs to the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaEdge {
    pub charset: CharSetId,
    pub target: DfaStateId,
}

impl FaEdge {
    pub fn new(charset: CharSetId, target: DfaStateId) -> Self {
        Self { charset, target }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaState {
    /// Symbol recognized when the automaton stops in this state.
    pub accept: Option<SymbolId>,
    /// Edges, tested in table order.
    pub edges: Vec<FaEdge>,
}

impl FaState {
    pub fn new(accept: Option<SymbolId>, edges: Vec<FaEdge>) -> Self {
        Self { accept, edges }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dfa {
    pub initial: DfaStateId,
    pub states: Vec<FaState>,
    pub charsets: Vec<CharacterSet>,
}

impl Dfa {
    pub fn state(&self, id: DfaStateId) -> Option<&FaState> {
        self.states.get(id)
    }

    pub fn accept(&self, id: DfaStateId) -> Option<SymbolId> {
        self.states.get(id).and_then(|state| state.accept)
    }

    /// Follow the first edge of `from` whose set contains `ch`.
    pub fn step(&self, from: DfaStateId, ch: char) -> Option<DfaStateId> {
        self.states.get(from)?.edges.iter().find_map(|edge| {
            self.charsets
                .get(edge.charset)
                .filter(|set| set.contains(ch))
                .map(|_| edge.target)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_edge_wins() {
        let dfa = Dfa {
            initial: 0,
            charsets: vec![
                [CharacterRange::from('a'..='z')].into_iter().collect(),
                [CharacterRange::from('a')].into_iter().collect(),
            ],
            states: vec![
                FaState::new(None, vec![FaEdge::new(0, 1), FaEdge::new(1, 2)]),
                FaState::new(Some(4), vec![]),
                FaState::new(Some(5), vec![]),
            ],
        };

        assert_eq!(dfa.step(0, 'a'), Some(1));
        assert_eq!(dfa.step(0, 'q'), Some(1));
        assert_eq!(dfa.step(0, '0'), None);
        assert_eq!(dfa.step(1, 'a'), None);
        assert_eq!(dfa.accept(1), Some(4));
        assert_eq!(dfa.accept(0), None);
    }
}
