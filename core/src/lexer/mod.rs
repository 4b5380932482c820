//! DFA lexer.
//!
//! Tokens are recognized by longest match over a lookahead buffer filled
//! lazily from the source. Groups (comments, strings) are folded into one
//! token on top of the raw lexer, see [`Lexer::produce_token`].
use std::collections::VecDeque;

use crate::{Grammar, GroupId, Position, Token};

mod group;
mod source;

pub use source::{reader_source, text_source, Source, Utf8Chars};

/// A group whose end has not been read yet, with the text gathered so far.
#[derive(Debug)]
struct OpenGroup<V> {
    group: GroupId,
    token: Token<V>,
}

pub struct Lexer<V> {
    source: Source,
    buffer: VecDeque<char>,
    position: Position,
    groups: Vec<OpenGroup<V>>,
}

impl<V> Default for Lexer<V> {
    fn default() -> Self {
        Self::new(Box::new(std::iter::empty()))
    }
}

impl<V> Lexer<V> {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            buffer: VecDeque::new(),
            position: Position::default(),
            groups: Vec::new(),
        }
    }

    /// Replace the source, dropping whatever was read from the previous one.
    pub fn open(&mut self, source: Source) {
        self.source = source;
        self.reset();
    }

    /// Forget the open groups and the lookahead, and count positions from
    /// the start again. The source itself is not rewound.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.position = Position::default();
        self.groups.clear();
    }

    /// Position of the next character to consume.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of groups still open.
    pub fn group_depth(&self) -> usize {
        self.groups.len()
    }

    /// The character `index` places ahead of the cursor, reading the source as needed.
    pub fn peek(&mut self, index: usize) -> Option<char> {
        while self.buffer.len() <= index {
            let ch = self.source.next()?;
            self.buffer.push_back(ch);
        }
        self.buffer.get(index).copied()
    }

    /// The next `count` characters, fewer if the source ends before.
    pub fn peek_text(&mut self, count: usize) -> String {
        // Make sure the buffer holds as much as the source can give.
        if count > 0 {
            self.peek(count - 1);
        }
        self.buffer.iter().take(count).collect()
    }

    /// Consume `count` characters, moving the position past them.
    ///
    /// Characters not looked at yet are read from the source first. Stops at
    /// the end of the source.
    pub fn consume(&mut self, count: usize) {
        if count > 0 {
            self.peek(count - 1);
        }
        let count = count.min(self.buffer.len());
        for ch in self.buffer.drain(..count) {
            self.position.advance(ch);
        }
    }

    /// Recognize the token at the cursor, without consuming it.
    ///
    /// The longest prefix reaching an accepting state wins. A character no
    /// edge accepts yields a one character error token, and the end of the
    /// source yields an empty end token.
    pub fn next_raw(&mut self, grammar: &Grammar) -> Token<V> {
        let position = self.position;

        if self.peek(0).is_none() {
            return Token::text(grammar.end_symbol().id, "", position);
        }

        let dfa = grammar.dfa();
        let mut state = dfa.initial;
        let mut read = 0;
        let mut accepted = None;

        while let Some(ch) = self.peek(read) {
            let Some(target) = dfa.step(state, ch) else {
                break;
            };

            state = target;
            read += 1;

            if let Some(symbol) = dfa.accept(state) {
                accepted = Some((symbol, read));
            }
        }

        let token = match accepted {
            Some((symbol, len)) => Token::text(symbol, self.peek_text(len), position),
            None => Token::text(grammar.error_symbol().id, self.peek_text(1), position),
        };

        log::trace!(
            "{} {:?} at {}",
            grammar.symbols()[token.symbol],
            token.as_text().unwrap_or_default(),
            position
        );

        token
    }
}
