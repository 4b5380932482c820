use crate::{ErrorKind, ProductionId};

use super::StateId;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Goto(StateId),
    Accept,
    Error,
}

impl Action {
    /// Decode an action from its table code and target value.
    pub fn decode(code: u16, target: u16) -> Result<Self, ErrorKind> {
        let target = target as usize;

        Ok(match code {
            1 => Self::Shift(target),
            2 => Self::Reduce(target),
            3 => Self::Goto(target),
            4 => Self::Accept,
            5 => Self::Error,
            _ => return Err(ErrorKind::InvalidAction(code)),
        })
    }

    /// Table code and target value, the inverse of [`Action::decode`].
    pub fn encode(self) -> (u16, u16) {
        match self {
            Action::Shift(to) => (1, to as u16),
            Action::Reduce(prod) => (2, prod as u16),
            Action::Goto(to) => (3, to as u16),
            Action::Accept => (4, 0),
            Action::Error => (5, 0),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(to) => write!(f, "s{}", to),
            Action::Reduce(to) => write!(f, "r{}", to),
            Action::Goto(to) => write!(f, "{}", to),
            Action::Accept => write!(f, "acc"),
            Action::Error => write!(f, "err"),
        }
    }
}
