//! Small grammars to test against, built in memory.
//!
//! Only compiled for tests, or with the `fixtures` feature.
use crate::{
    dfa::{CharacterRange, CharacterSet, FaEdge, FaState},
    lr::{Action, LrState},
    AdvanceMode, EndingMode, Grammar, GrammarBuilder, Group, Production, PropertyIndex, Symbol,
    SymbolKind, TableCounts,
};

/// How the comment group of [`boolean_grammar`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupConfig {
    /// May a comment open inside a comment ?
    pub nested: bool,
    pub advance: AdvanceMode,
    pub ending: EndingMode,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            nested: true,
            advance: AdvanceMode::Character,
            ending: EndingMode::Closed,
        }
    }
}

fn single(ch: char) -> CharacterSet {
    [CharacterRange::from(ch)].into_iter().collect()
}

fn edges(pairs: &[(usize, usize)]) -> Vec<FaEdge> {
    pairs
        .iter()
        .map(|(charset, target)| FaEdge::new(*charset, *target))
        .collect()
}

/// Boolean expressions.
///
/// ```text
/// <Expr>  ::= <Expr> '||' <Value>
///           | <Value>
/// <Value> ::= true
///           | false
/// ```
///
/// Whitespace is noise, and `/* ... */` comments are a group.
///
/// # Panics
///
/// Never, the tables are consistent.
pub fn boolean_grammar(config: GroupConfig) -> Grammar {
    use Action::*;

    let mut builder = GrammarBuilder::new();
    builder
        .property(PropertyIndex::Name as usize, "Boolean")
        .property(PropertyIndex::Version as usize, "1.0")
        .property(PropertyIndex::About as usize, "Boolean expressions with comments")
        .property(PropertyIndex::GeneratedBy as usize, "tablr fixtures")
        .table_counts(TableCounts {
            symbols: 11,
            charsets: 12,
            productions: 4,
            dfa_states: 17,
            lr_states: 7,
            groups: 1,
        })
        .initial_states(0, 0);

    let symbols = [
        ("EOF", SymbolKind::End),
        ("Error", SymbolKind::Error),
        ("Whitespace", SymbolKind::Noise),
        ("Comment", SymbolKind::Noise),
        ("/*", SymbolKind::GroupStart),
        ("*/", SymbolKind::GroupEnd),
        ("||", SymbolKind::Terminal),
        ("false", SymbolKind::Terminal),
        ("true", SymbolKind::Terminal),
        ("Expr", SymbolKind::Nonterminal),
        ("Value", SymbolKind::Nonterminal),
    ];
    for (id, (name, kind)) in symbols.into_iter().enumerate() {
        builder
            .symbol(Symbol::new(id, name, kind))
            .expect("symbol");
    }

    let whitespace: CharacterSet = [
        CharacterRange::from('\t'..='\n'),
        CharacterRange::from('\r'),
        CharacterRange::from(' '),
    ]
    .into_iter()
    .collect();
    let charsets = [
        whitespace,
        single('|'),
        single('t'),
        single('r'),
        single('u'),
        single('e'),
        single('f'),
        single('a'),
        single('l'),
        single('s'),
        single('/'),
        single('*'),
    ];
    for (id, set) in charsets.into_iter().enumerate() {
        builder.charset(id, set).expect("charset");
    }

    for (id, head, handle) in [
        (0, 9, vec![9, 6, 10]),
        (1, 9, vec![10]),
        (2, 10, vec![8]),
        (3, 10, vec![7]),
    ] {
        builder
            .production(Production::new(id, head, handle))
            .expect("production");
    }

    let states = [
        // Whitespace, ||, true, false, /*, */
        FaState::new(None, edges(&[(0, 1), (1, 2), (2, 4), (6, 8), (10, 13), (11, 15)])),
        FaState::new(Some(2), edges(&[(0, 1)])),
        FaState::new(None, edges(&[(1, 3)])),
        FaState::new(Some(6), vec![]),
        // true
        FaState::new(None, edges(&[(3, 5)])),
        FaState::new(None, edges(&[(4, 6)])),
        FaState::new(None, edges(&[(5, 7)])),
        FaState::new(Some(8), vec![]),
        // false
        FaState::new(None, edges(&[(7, 9)])),
        FaState::new(None, edges(&[(8, 10)])),
        FaState::new(None, edges(&[(9, 11)])),
        FaState::new(None, edges(&[(5, 12)])),
        FaState::new(Some(7), vec![]),
        // /*
        FaState::new(None, edges(&[(11, 14)])),
        FaState::new(Some(4), vec![]),
        // */
        FaState::new(None, edges(&[(10, 16)])),
        FaState::new(Some(5), vec![]),
    ];
    for (id, state) in states.into_iter().enumerate() {
        builder.dfa_state(id, state).expect("DFA state");
    }

    let rows = [
        LrState::new([(8, Shift(3)), (7, Shift(4)), (9, Goto(1)), (10, Goto(2))]),
        LrState::new([(0, Accept), (6, Shift(5))]),
        LrState::new([(0, Reduce(1)), (6, Reduce(1))]),
        LrState::new([(0, Reduce(2)), (6, Reduce(2))]),
        LrState::new([(0, Reduce(3)), (6, Reduce(3))]),
        LrState::new([(8, Shift(3)), (7, Shift(4)), (10, Goto(6))]),
        LrState::new([(0, Reduce(0)), (6, Reduce(0))]),
    ];
    for (id, row) in rows.into_iter().enumerate() {
        builder.lr_state(id, row).expect("LALR state");
    }

    builder
        .group(Group {
            id: 0,
            name: "Comment Block".into(),
            container: 3,
            start: 4,
            end: 5,
            advance: config.advance,
            ending: config.ending,
            nesting: if config.nested { vec![0] } else { vec![] },
        })
        .expect("group");

    builder.build().expect("consistent boolean tables")
}

/// [`boolean_grammar`], encoded as a table file.
pub fn boolean_tables(config: GroupConfig) -> Vec<u8> {
    encode(&boolean_grammar(config))
}

/// Terminals `A = a`, `AB = ab` and `C = c`, where `abc` walks into a
/// non-accepting state. No productions.
pub fn longest_match_grammar() -> Grammar {
    let mut builder = GrammarBuilder::new();
    builder
        .property(PropertyIndex::Name as usize, "Longest match")
        .table_counts(TableCounts {
            symbols: 5,
            charsets: 3,
            productions: 0,
            dfa_states: 5,
            lr_states: 1,
            groups: 0,
        });

    let symbols = [
        ("EOF", SymbolKind::End),
        ("Error", SymbolKind::Error),
        ("A", SymbolKind::Terminal),
        ("AB", SymbolKind::Terminal),
        ("C", SymbolKind::Terminal),
    ];
    for (id, (name, kind)) in symbols.into_iter().enumerate() {
        builder
            .symbol(Symbol::new(id, name, kind))
            .expect("symbol");
    }

    for (id, ch) in ['a', 'b', 'c'].into_iter().enumerate() {
        builder.charset(id, single(ch)).expect("charset");
    }

    let states = [
        FaState::new(None, edges(&[(0, 1), (2, 4)])),
        FaState::new(Some(2), edges(&[(1, 2)])),
        FaState::new(Some(3), edges(&[(2, 3)])),
        FaState::new(None, vec![]),
        FaState::new(Some(4), vec![]),
    ];
    for (id, state) in states.into_iter().enumerate() {
        builder.dfa_state(id, state).expect("DFA state");
    }

    builder
        .lr_state(0, LrState::default())
        .expect("LALR state");

    builder.build().expect("consistent longest match tables")
}

fn encode(grammar: &Grammar) -> Vec<u8> {
    let mut data = Vec::new();
    grammar
        .write_to(&mut data)
        .expect("writing to memory cannot fail");
    data
}
