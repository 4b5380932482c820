//! Helpers shared by the integration tests.
use tablr::{ParseMessage, Parser, SymbolKind};

pub use tablr_core::fixtures;

/// What the parser reported at one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Token {
        symbol: String,
        kind: SymbolKind,
        text: String,
    },
    /// The reduced production, rendered.
    Reduction(String),
    Accept,
    Error(ParseMessage),
}

impl Event {
    pub fn token(symbol: &str, kind: SymbolKind, text: &str) -> Self {
        Self::Token {
            symbol: symbol.to_owned(),
            kind,
            text: text.to_owned(),
        }
    }
}

/// Drive the parser until it accepts or fails.
pub fn run<V>(parser: &mut Parser<V>) -> Vec<Event> {
    let mut events = Vec::new();

    loop {
        let message = parser.parse();
        let event = match message {
            ParseMessage::TokenRead => {
                let token = parser.current_token().expect("a token was just read");
                let symbol = &parser.symbols()[token.symbol];
                Event::Token {
                    symbol: symbol.name.clone(),
                    kind: symbol.kind,
                    text: token.as_text().unwrap_or_default().to_owned(),
                }
            }
            ParseMessage::Reduction => {
                let reduction = parser.current_reduction().expect("a reduction was just made");
                let production = &parser.productions()[reduction.production()];
                Event::Reduction(production.text(parser.symbols(), false))
            }
            ParseMessage::Accept => Event::Accept,
            error => Event::Error(error),
        };

        events.push(event);
        if message.is_final() {
            return events;
        }
    }
}

/// The tokens the parser read, noise left out.
pub fn significant_tokens(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| matches!(event, Event::Token { kind, .. } if *kind != SymbolKind::Noise))
        .cloned()
        .collect()
}

pub fn reductions(events: &[Event]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Reduction(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
