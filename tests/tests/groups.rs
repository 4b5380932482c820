use std::sync::Arc;

use rstest::rstest;
use tablr::{AdvanceMode, EndingMode, ParseMessage, Parser, ParserOptions, SymbolKind};
use tablr_tests::{
    fixtures::{boolean_grammar, GroupConfig},
    run, Event,
};

fn run_with(config: GroupConfig, text: &str) -> Vec<Event> {
    let mut parser: Parser<()> =
        Parser::with_grammar(Arc::new(boolean_grammar(config)), ParserOptions::default());
    parser.open_text(text);
    run(&mut parser)
}

fn comments(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Token { symbol, text, .. } if symbol == "Comment" => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[rstest]
#[case(AdvanceMode::Character)]
#[case(AdvanceMode::Token)]
fn test_nested_comment(#[case] advance: AdvanceMode) {
    let config = GroupConfig {
        advance,
        ..GroupConfig::default()
    };
    let events = run_with(config, "true /* a /* b */ c */ || false");

    assert_eq!(comments(&events), vec!["/* a /* b */ c */"]);
    assert_eq!(events.last(), Some(&Event::Accept));
}

#[test]
fn test_comment_without_nesting() {
    let config = GroupConfig {
        nested: false,
        ..GroupConfig::default()
    };
    let events = run_with(config, "true /* a /* b */ c */ || false");

    assert_eq!(comments(&events), vec!["/* a /* b */"]);
    // What follows the first end marker is parsed as input.
    assert_eq!(
        events.last(),
        Some(&Event::Error(ParseMessage::LexicalError))
    );
    assert!(events.contains(&Event::token("Error", SymbolKind::Error, "c")));
}

#[test]
fn test_open_ending_hands_the_end_marker_to_the_parser() {
    let config = GroupConfig {
        ending: EndingMode::Open,
        ..GroupConfig::default()
    };
    let events = run_with(config, "true /* note */");

    assert_eq!(comments(&events), vec!["/* note "]);
    assert!(events.contains(&Event::token("*/", SymbolKind::GroupEnd, "*/")));
    assert_eq!(events.last(), Some(&Event::Error(ParseMessage::SyntaxError)));
}

#[test]
fn test_runaway_comment() {
    let events = run_with(GroupConfig::default(), "true || /* false");
    assert_eq!(events.last(), Some(&Event::Error(ParseMessage::GroupError)));
}
