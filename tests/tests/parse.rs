use std::{io::Cursor, sync::Arc, thread};

use rstest::rstest;
use tablr::{Grammar, ParseMessage, Parser, ParserOptions, Position, SymbolKind};
use tablr_tests::{
    fixtures::{boolean_grammar, GroupConfig},
    reductions, run, significant_tokens, Event,
};

fn grammar() -> Arc<Grammar> {
    Arc::new(boolean_grammar(GroupConfig::default()))
}

fn parser(text: &str) -> Parser<()> {
    let mut parser = Parser::with_grammar(grammar(), ParserOptions::default());
    parser.open_text(text);
    parser
}

#[test]
fn test_true_or_false() {
    let mut parser = parser("true || false");
    let events = run(&mut parser);

    assert_eq!(
        significant_tokens(&events),
        vec![
            Event::token("true", SymbolKind::Terminal, "true"),
            Event::token("||", SymbolKind::Terminal, "||"),
            Event::token("false", SymbolKind::Terminal, "false"),
            Event::token("EOF", SymbolKind::End, ""),
        ]
    );
    assert_eq!(
        reductions(&events),
        vec![
            "<Value> ::= true",
            "<Expr> ::= <Value>",
            "<Value> ::= false",
            "<Expr> ::= <Expr> '||' <Value>",
        ]
    );
    assert_eq!(events.last(), Some(&Event::Accept));
}

#[test]
fn test_whitespace_is_read_then_skipped() {
    let mut parser = parser("true || false");
    let events = run(&mut parser);

    let noise = events
        .iter()
        .filter(|event| matches!(event, Event::Token { kind: SymbolKind::Noise, .. }))
        .count();
    assert_eq!(noise, 2);
}

#[test]
fn test_double_or_is_a_syntax_error() {
    let mut parser = parser("true || || false");
    let events = run(&mut parser);

    assert_eq!(events.last(), Some(&Event::Error(ParseMessage::SyntaxError)));

    let expected: Vec<String> = parser
        .expected_symbols()
        .into_iter()
        .map(|sym| sym.name.clone())
        .collect();
    assert!(!expected.contains(&"||".to_owned()));
    assert_eq!(expected, vec!["true", "false"]);
    assert_eq!(parser.current_position(), Position::new(0, 8));
}

#[rstest]
#[case("", ParseMessage::SyntaxError)]
#[case("true ||", ParseMessage::SyntaxError)]
#[case("true && false", ParseMessage::LexicalError)]
#[case("true /* open", ParseMessage::GroupError)]
#[case("false || true || false", ParseMessage::Accept)]
#[case("\ttrue\r\n||\nfalse ", ParseMessage::Accept)]
fn test_outcome(#[case] text: &str, #[case] outcome: ParseMessage) {
    let mut parser = parser(text);
    let last = run(&mut parser).pop();

    let expected = match outcome {
        ParseMessage::Accept => Event::Accept,
        error => Event::Error(error),
    };
    assert_eq!(last, Some(expected));
}

#[test]
fn test_empty_input_expects_a_value() {
    let mut parser = parser("");
    run(&mut parser);

    let expected: Vec<&str> = parser
        .expected_symbols()
        .into_iter()
        .map(|sym| sym.name.as_str())
        .collect();
    assert_eq!(expected, vec!["true", "false"]);
}

#[test]
fn test_restart_matches_a_fresh_parser() {
    let grammar = grammar();

    let mut reused: Parser<()> = Parser::with_grammar(grammar.clone(), ParserOptions::default());
    reused.open_text("true || || false");
    run(&mut reused);
    reused.open_text("false || true");
    let replayed = run(&mut reused);

    let mut fresh: Parser<()> = Parser::with_grammar(grammar, ParserOptions::default());
    fresh.open_text("false || true");
    let expected = run(&mut fresh);

    assert_eq!(replayed, expected);
    assert_eq!(reused.current_position(), fresh.current_position());
}

#[test]
fn test_streaming_source() {
    let mut from_text = parser("true || false\n|| true");
    let expected = run(&mut from_text);

    let mut from_reader: Parser<()> = Parser::with_grammar(grammar(), ParserOptions::default());
    from_reader.open_reader(Cursor::new(b"true || false\n|| true".to_vec()));

    assert_eq!(run(&mut from_reader), expected);
}

#[test]
fn test_tables_are_shared_between_threads() {
    let grammar = grammar();

    let handles: Vec<_> = ["true || false", "false", "true || || true"]
        .into_iter()
        .map(|text| {
            let grammar = grammar.clone();
            thread::spawn(move || {
                let mut parser: Parser<()> = Parser::with_grammar(grammar, ParserOptions::default());
                parser.open_text(text);
                run(&mut parser).pop()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(
        outcomes,
        vec![
            Some(Event::Accept),
            Some(Event::Accept),
            Some(Event::Error(ParseMessage::SyntaxError)),
        ]
    );
}

#[test]
fn test_trimmed_parse_reports_fewer_reductions() {
    let mut parser: Parser<()> =
        Parser::with_grammar(grammar(), ParserOptions::default().with_trim_reductions(true));
    parser.open_text("true || false");
    let events = run(&mut parser);

    assert_eq!(
        reductions(&events),
        vec![
            "<Value> ::= true",
            "<Value> ::= false",
            "<Expr> ::= <Expr> '||' <Value>",
        ]
    );
    assert_eq!(events.last(), Some(&Event::Accept));
}

#[test]
fn test_evaluate_with_values() {
    let mut parser: Parser<bool> =
        Parser::with_grammar(grammar(), ParserOptions::default().with_trim_reductions(true));
    parser.open_text("false || false || true");

    let mut result = None;
    loop {
        match parser.parse() {
            ParseMessage::TokenRead => {}
            ParseMessage::Reduction => {
                let reduction = parser.current_reduction().unwrap();
                let value = match parser.productions()[reduction.production()].handle.as_slice() {
                    [_, _, _] => {
                        let lhs = reduction.token(0).and_then(|tok| tok.value()).copied();
                        let rhs = reduction.token(2).and_then(|tok| tok.value()).copied();
                        lhs.unwrap() || rhs.unwrap()
                    }
                    _ => reduction.token(0).and_then(|tok| tok.as_text()) == Some("true"),
                };
                result = Some(value);
                parser.set_current_value(value);
            }
            ParseMessage::Accept => break,
            other => panic!("{other} at {}", parser.current_position()),
        }
    }

    assert_eq!(result, Some(true));
}
