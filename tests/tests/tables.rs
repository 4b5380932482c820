use std::{
    io::{Cursor, Write},
    sync::Arc,
};

use tempfile::{tempdir, NamedTempFile};

use tablr::{
    egt::{EgtWriter, Entry, RecordType},
    ErrorKind, Grammar, ParseMessage, Parser, ParserOptions, PropertyIndex,
};
use tablr_tests::{
    fixtures::{boolean_grammar, boolean_tables, GroupConfig},
    run, Event,
};

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&boolean_tables(GroupConfig::default())).unwrap();
    file.flush().unwrap();

    let mut parser: Parser<()> = Parser::default();
    parser.load_tables(file.path()).unwrap();
    assert!(parser.are_tables_loaded());

    let grammar = parser.grammar().unwrap();
    assert_eq!(grammar.properties().name(), "Boolean");
    assert_eq!(grammar.properties().version(), "1.0");
    assert_eq!(grammar.properties().get(PropertyIndex::GeneratedBy), "tablr fixtures");

    parser.open_text("false || true");
    assert_eq!(run(&mut parser).last(), Some(&Event::Accept));
}

#[test]
fn test_load_from_stream() {
    let data = boolean_tables(GroupConfig::default());

    let mut parser: Parser<()> = Parser::default();
    parser.load_tables_from(Cursor::new(data)).unwrap();

    assert_eq!(parser.symbols().len(), 11);
    assert_eq!(parser.productions().len(), 4);
}

#[test]
fn test_declared_counts_match_the_tables() {
    let grammar = Grammar::from_bytes(&boolean_tables(GroupConfig::default())).unwrap();
    let counts = grammar.table_counts();

    assert_eq!(counts.symbols, grammar.symbols().len());
    assert_eq!(counts.charsets, grammar.dfa().charsets.len());
    assert_eq!(counts.productions, grammar.productions().len());
    assert_eq!(counts.dfa_states, grammar.dfa().states.len());
    assert_eq!(counts.lr_states, grammar.lr().len());
    assert_eq!(counts.groups, grammar.groups().len());
}

#[test]
fn test_save_then_load() {
    let grammar = boolean_grammar(GroupConfig {
        nested: false,
        ..GroupConfig::default()
    });

    let dir = tempdir().unwrap();
    let path = dir.path().join("saved.egt");
    grammar.save(&path).unwrap();

    assert_eq!(Grammar::load(&path).unwrap(), grammar);
}

#[test]
fn test_failed_load_leaves_the_parser_unloaded() {
    let mut parser: Parser<()> = Parser::with_grammar(
        Arc::new(boolean_grammar(GroupConfig::default())),
        ParserOptions::default(),
    );

    let mut writer = EgtWriter::new(Vec::new(), "Broken").unwrap();
    writer
        .write_record(&[
            RecordType::Symbol.into(),
            Entry::UInt16(0),
            Entry::String("EOF".into()),
            Entry::UInt16(3),
        ])
        .unwrap();

    let err = parser
        .load_tables_from(Cursor::new(writer.into_inner()))
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MissingTableCounts));
    assert!(!parser.are_tables_loaded());

    parser.open_text("true");
    assert_eq!(parser.parse(), ParseMessage::NotLoadedError);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let mut parser: Parser<()> = Parser::default();
    let err = parser
        .load_tables(dir.path().join("does-not-exist.egt"))
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Io(_)));
}

#[test]
fn test_lr_table_rendering() {
    let grammar = boolean_grammar(GroupConfig::default());
    let rendered = grammar.lr().display(grammar.symbols()).to_string();

    assert!(rendered.contains("acc"));
    assert!(rendered.contains("<Expr>"));
    assert!(rendered.contains("'||'"));
}
