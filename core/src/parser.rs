//! LALR(1) driver.
//!
//! The parser is driven one step at a time by [`Parser::parse`], which hands
//! control back to the caller after every event worth reporting.
use std::{collections::VecDeque, io::BufRead, path::Path, sync::Arc};

use itertools::Itertools as _;

use crate::{
    lexer::{reader_source, text_source, Lexer, Source},
    lr::{Action, StateId},
    ExpectedSymbols, Grammar, Position, Production, ProductionId, Reduction, Symbol, SymbolId,
    SymbolKind, TablrResult, Token, TokenData,
};

/// What a call to [`Parser::parse`] stopped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseMessage {
    /// A token was read and queued, see [`Parser::current_token`].
    TokenRead,
    /// A production was reduced, see [`Parser::current_reduction`].
    Reduction,
    /// The input is accepted.
    Accept,
    /// No tables were loaded.
    NotLoadedError,
    /// The lexer could not recognize the input.
    LexicalError,
    /// The current token is not expected here, see [`Parser::expected_symbols`].
    SyntaxError,
    /// The input ended inside a group.
    GroupError,
    /// The tables are inconsistent.
    InternalError,
}

impl ParseMessage {
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::NotLoadedError
                | Self::LexicalError
                | Self::SyntaxError
                | Self::GroupError
                | Self::InternalError
        )
    }

    /// Does the parse stop here ?
    pub fn is_final(self) -> bool {
        self == Self::Accept || self.is_error()
    }
}

impl std::fmt::Display for ParseMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::TokenRead => "token read",
            Self::Reduction => "reduction",
            Self::Accept => "accept",
            Self::NotLoadedError => "tables not loaded",
            Self::LexicalError => "lexical error",
            Self::SyntaxError => "syntax error",
            Self::GroupError => "runaway group",
            Self::InternalError => "internal error",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Skip the reductions of productions whose body is a single nonterminal.
    pub trim_reductions: bool,
}

impl ParserOptions {
    pub fn with_trim_reductions(mut self, trim: bool) -> Self {
        self.trim_reductions = trim;
        self
    }
}

/// A table-driven parser.
///
/// `V` is the type of the values the caller attaches to tokens and
/// reductions. The parser never looks at them.
pub struct Parser<V> {
    grammar: Option<Arc<Grammar>>,
    options: ParserOptions,
    lexer: Lexer<V>,
    /// Tokens waiting to be parsed, the front one is the lookahead.
    input: VecDeque<Token<V>>,
    stack: Vec<Token<V>>,
    state: StateId,
    expected: Vec<SymbolId>,
    position: Position,
    /// The last step reported a reduction, still at the top of the stack.
    reduced: bool,
}

impl<V> Default for Parser<V> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl<V> Parser<V> {
    /// A parser without tables.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            grammar: None,
            options,
            lexer: Lexer::default(),
            input: VecDeque::new(),
            stack: Vec::new(),
            state: 0,
            expected: Vec::new(),
            position: Position::default(),
            reduced: false,
        }
    }

    pub fn with_grammar(grammar: Arc<Grammar>, options: ParserOptions) -> Self {
        let mut parser = Self::new(options);
        parser.set_grammar(grammar);
        parser
    }

    /// Identifies the engine.
    pub fn about(&self) -> String {
        format!(
            "{} {}, table-driven LALR(1) parser engine",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn trim_reductions(&self) -> bool {
        self.options.trim_reductions
    }

    pub fn set_trim_reductions(&mut self, trim: bool) {
        self.options.trim_reductions = trim;
    }

    /// Use `grammar` from now on, and restart.
    pub fn set_grammar(&mut self, grammar: Arc<Grammar>) {
        self.grammar = Some(grammar);
        self.restart();
    }

    /// Load tables from a file.
    ///
    /// On failure the parser is left without tables.
    pub fn load_tables<P: AsRef<Path>>(&mut self, path: P) -> TablrResult<()> {
        self.grammar = None;
        let grammar = Grammar::load(path)?;
        self.set_grammar(Arc::new(grammar));
        Ok(())
    }

    /// Load tables from a binary stream.
    ///
    /// On failure the parser is left without tables.
    pub fn load_tables_from<R: std::io::Read>(&mut self, reader: R) -> TablrResult<()> {
        self.grammar = None;
        let grammar = Grammar::from_reader(reader)?;
        self.set_grammar(Arc::new(grammar));
        Ok(())
    }

    pub fn are_tables_loaded(&self) -> bool {
        self.grammar.is_some()
    }

    pub fn grammar(&self) -> Option<&Arc<Grammar>> {
        self.grammar.as_ref()
    }

    /// The symbol table, empty without tables.
    pub fn symbols(&self) -> &[Symbol] {
        self.grammar.as_deref().map(Grammar::symbols).unwrap_or_default()
    }

    /// The production table, empty without tables.
    pub fn productions(&self) -> &[Production] {
        self.grammar
            .as_deref()
            .map(Grammar::productions)
            .unwrap_or_default()
    }

    /// Parse `source` from its start.
    pub fn open(&mut self, source: Source) {
        self.lexer.open(source);
        self.restart();
    }

    pub fn open_text<S: Into<String>>(&mut self, text: S) {
        self.open(text_source(text));
    }

    /// Parse UTF-8 text read from `reader`, as the lexer needs it.
    pub fn open_reader<R: BufRead + Send + 'static>(&mut self, reader: R) {
        self.open(reader_source(reader));
    }

    /// Drop the parse in progress, keeping the tables and the source.
    pub fn restart(&mut self) {
        self.lexer.reset();
        self.input.clear();
        self.stack.clear();
        self.expected.clear();
        self.position = Position::default();
        self.state = 0;
        self.reduced = false;

        if let Some(grammar) = &self.grammar {
            self.state = grammar.lr().initial;
            let mut start = Token::new(
                grammar.end_symbol().id,
                TokenData::default(),
                Position::default(),
            );
            start.state = self.state;
            self.stack.push(start);
        }
    }

    /// The lookahead token.
    pub fn current_token(&self) -> Option<&Token<V>> {
        self.input.front()
    }

    pub fn current_token_text(&self) -> Option<&str> {
        self.current_token().and_then(Token::as_text)
    }

    /// Remove the lookahead token, the next one is read on the next step.
    pub fn discard_current_token(&mut self) -> Option<Token<V>> {
        self.input.pop_front()
    }

    /// Queue a token after those already waiting.
    pub fn enqueue_input(&mut self, token: Token<V>) {
        self.input.push_back(token);
    }

    /// Make `token` the lookahead, ahead of those already waiting.
    pub fn push_input(&mut self, token: Token<V>) {
        self.input.push_front(token);
    }

    /// The reduction reported by the last step.
    ///
    /// `None` when the last step was not a reduction, or once its value was
    /// replaced with [`Parser::set_current_value`].
    pub fn current_reduction(&self) -> Option<&Reduction<V>> {
        self.stack
            .last()
            .filter(|_| self.reduced)
            .and_then(Token::as_reduction)
    }

    pub fn current_reduction_mut(&mut self) -> Option<&mut Reduction<V>> {
        let reduced = self.reduced;
        self.stack
            .last_mut()
            .filter(|_| reduced)
            .and_then(Token::as_reduction_mut)
    }

    /// Replace what the reduction reported by the last step carries with a
    /// value, returning what it carried before.
    ///
    /// Does nothing when the last step was not a reduction.
    pub fn set_current_value(&mut self, value: V) -> Option<TokenData<V>> {
        if !self.reduced {
            return None;
        }
        self.stack
            .last_mut()
            .map(|top| std::mem::replace(&mut top.data, TokenData::Value(value)))
    }

    /// Position of the lookahead token.
    pub fn current_position(&self) -> Position {
        self.position
    }

    /// Symbols the parser would have accepted, after a syntax error.
    pub fn expected_symbols(&self) -> Vec<&Symbol> {
        let symbols = self.symbols();
        self.expected
            .iter()
            .filter_map(|id| symbols.get(*id))
            .collect()
    }

    pub fn expected(&self) -> ExpectedSymbols {
        ExpectedSymbols::new(self.expected_symbols())
    }

    /// Run until the next event.
    pub fn parse(&mut self) -> ParseMessage {
        let Some(grammar) = self.grammar.clone() else {
            return ParseMessage::NotLoadedError;
        };
        self.reduced = false;

        loop {
            let Some(token) = self.input.front() else {
                let token = self.lexer.produce_token(&grammar);
                self.input.push_back(token);
                return ParseMessage::TokenRead;
            };

            self.position = token.position;

            if self.lexer.group_depth() > 0 {
                return ParseMessage::GroupError;
            }

            match grammar.kind_of(token.symbol) {
                Some(SymbolKind::Noise) => {
                    self.input.pop_front();
                }
                Some(SymbolKind::Error) => return ParseMessage::LexicalError,
                _ => {
                    if let Some(message) = self.parse_lalr(&grammar) {
                        return message;
                    }
                }
            }
        }
    }

    /// One automaton step on the lookahead token.
    ///
    /// Returns `None` when parsing goes on without anything to report.
    fn parse_lalr(&mut self, grammar: &Grammar) -> Option<ParseMessage> {
        let symbol = self.input.front()?.symbol;

        match grammar.lr().action(self.state, symbol).copied() {
            Some(Action::Accept) => {
                log::trace!("#{} accept", self.state);
                Some(ParseMessage::Accept)
            }

            // A goto can only be found for a nonterminal pushed by the caller.
            Some(Action::Shift(to) | Action::Goto(to)) => {
                log::trace!("#{} shift {} to #{}", self.state, grammar.symbols()[symbol], to);
                self.state = to;
                if let Some(mut token) = self.input.pop_front() {
                    token.state = to;
                    self.stack.push(token);
                }
                None
            }

            Some(Action::Reduce(production)) => self.reduce(grammar, production),

            Some(Action::Error) | None => {
                self.expected = grammar
                    .lr()
                    .state(self.state)
                    .into_iter()
                    .flat_map(|row| row.iter())
                    .map(|(sym, _)| *sym)
                    .filter(|sym| grammar.kind_of(*sym).is_some_and(SymbolKind::is_expectable))
                    .unique()
                    .collect();

                log::trace!(
                    "#{} unexpected {}, expecting {}",
                    self.state,
                    symbol,
                    self.expected()
                );
                Some(ParseMessage::SyntaxError)
            }
        }
    }

    fn reduce(&mut self, grammar: &Grammar, id: ProductionId) -> Option<ParseMessage> {
        let Some(production) = grammar.production(id) else {
            log::error!("reduce by unknown production {id}");
            return Some(ParseMessage::InternalError);
        };

        // The bottom of the stack is the start token, never part of a handle.
        if self.stack.len() <= production.len() {
            log::error!("stack too short to reduce {}", production.text(grammar.symbols(), false));
            return Some(ParseMessage::InternalError);
        }

        let trimmed =
            self.options.trim_reductions && production.contains_one_nonterminal(grammar.symbols());

        let mut head = if trimmed {
            let mut token = self.stack.pop()?;
            token.symbol = production.head;
            token
        } else {
            let tokens = self.stack.split_off(self.stack.len() - production.len());
            let position = tokens.first().map_or(self.position, |tok| tok.position);
            Token::new(
                production.head,
                TokenData::Reduction(Reduction::new(id, tokens)),
                position,
            )
        };

        let exposed = self.stack.last().map_or(grammar.lr().initial, |tok| tok.state);
        let Some(to) = grammar.lr().goto(exposed, production.head) else {
            log::error!(
                "no goto for {} in state #{}",
                grammar.symbols()[production.head],
                exposed
            );
            return Some(ParseMessage::InternalError);
        };

        log::trace!(
            "#{} reduce {}{}, goto #{}",
            self.state,
            production.text(grammar.symbols(), false),
            if trimmed { " (trimmed)" } else { "" },
            to
        );

        self.state = to;
        head.state = to;
        self.stack.push(head);

        self.reduced = !trimmed;
        (!trimmed).then_some(ParseMessage::Reduction)
    }
}
