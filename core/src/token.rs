use crate::{lr::StateId, Position, Reduction, SymbolId};

/// What a token carries.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenData<V> {
    /// Source text recognized by the lexer.
    Text(String),
    /// The reduction a nonterminal was built from.
    Reduction(Reduction<V>),
    /// A value set by the caller.
    Value(V),
}

impl<V> Default for TokenData<V> {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A terminal read from the source, or a nonterminal produced by a reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V> {
    pub symbol: SymbolId,
    pub data: TokenData<V>,
    pub position: Position,
    /// LALR state reached once the token was pushed on the stack.
    pub state: StateId,
}

impl<V> Token<V> {
    pub fn new(symbol: SymbolId, data: TokenData<V>, position: Position) -> Self {
        Self {
            symbol,
            data,
            position,
            state: 0,
        }
    }

    pub fn text<S: Into<String>>(symbol: SymbolId, text: S, position: Position) -> Self {
        Self::new(symbol, TokenData::Text(text.into()), position)
    }

    /// The source text, if the token still carries it.
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            TokenData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_reduction(&self) -> Option<&Reduction<V>> {
        match &self.data {
            TokenData::Reduction(reduction) => Some(reduction),
            _ => None,
        }
    }

    pub fn as_reduction_mut(&mut self) -> Option<&mut Reduction<V>> {
        match &mut self.data {
            TokenData::Reduction(reduction) => Some(reduction),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&V> {
        match &self.data {
            TokenData::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Append text to a text token. Tokens carrying anything else are left as is.
    pub(crate) fn push_text(&mut self, more: &str) {
        if let TokenData::Text(text) = &mut self.data {
            text.push_str(more);
        }
    }
}
