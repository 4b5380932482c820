//! Lexical groups: regions such as comments or strings which are folded
//! into a single token.

use crate::{ErrorKind, SymbolId};

/// The group's index in the group table.
pub type GroupId = usize;

/// How the content of a group is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Append whole tokens to the group.
    Token = 0,
    /// Append one character at a time.
    Character = 1,
}

impl TryFrom<u16> for AdvanceMode {
    type Error = ErrorKind;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Token),
            1 => Ok(Self::Character),
            _ => Err(ErrorKind::InvalidAdvanceMode(value)),
        }
    }
}

/// What happens to the end symbol when the group closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingMode {
    /// The end symbol is left in the input.
    Open = 0,
    /// The end symbol is consumed as part of the group.
    Closed = 1,
}

impl TryFrom<u16> for EndingMode {
    type Error = ErrorKind;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            _ => Err(ErrorKind::InvalidEndingMode(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// Symbol given to the folded token.
    pub container: SymbolId,
    pub start: SymbolId,
    pub end: SymbolId,
    pub advance: AdvanceMode,
    pub ending: EndingMode,
    /// Groups allowed to open inside this one.
    pub nesting: Vec<GroupId>,
}

impl Group {
    pub fn can_nest(&self, group: GroupId) -> bool {
        self.nesting.contains(&group)
    }
}
