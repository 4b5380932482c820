//! Table-driven lexer and LALR(1) parser engine.
//!
//! Load tables compiled by an external grammar compiler, open a source and
//! drive the parser step by step:
//!
//! ```no_run
//! use tablr::{Grammar, ParseMessage, Parser, ParserOptions};
//! use std::sync::Arc;
//!
//! let grammar = Arc::new(Grammar::load("boolean.egt")?);
//! let mut parser: Parser<bool> = Parser::with_grammar(grammar, ParserOptions::default());
//! parser.open_text("true || false");
//!
//! loop {
//!     match parser.parse() {
//!         ParseMessage::TokenRead => {}
//!         ParseMessage::Reduction => {}
//!         ParseMessage::Accept => break,
//!         error => panic!("{error} at {}", parser.current_position()),
//!     }
//! }
//! # Ok::<(), tablr::TablrError>(())
//! ```
pub use tablr_core::*;
