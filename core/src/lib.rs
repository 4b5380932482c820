pub mod dfa;
pub mod egt;
pub mod error;
pub mod grammar;
pub mod group;
pub mod lexer;
pub mod lr;
pub mod parser;
pub mod position;
pub mod production;
pub mod reduction;
pub mod symbol;
pub mod token;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use error::{ErrorKind, ExpectedSymbols, TablrError};
pub use grammar::{Grammar, GrammarBuilder, GrammarProperties, PropertyIndex, TableCounts};
pub use group::*;
pub use lexer::Lexer;
pub use parser::{ParseMessage, Parser, ParserOptions};
pub use position::Position;
pub use production::*;
pub use reduction::Reduction;
pub use symbol::*;
pub use token::{Token, TokenData};

pub mod traits {
    pub use crate::symbol::traits::SymbolSlice;
}

pub type TablrResult<T> = Result<T, TablrError>;
