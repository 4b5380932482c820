/*!
  LALR(1) automaton tables.
*/
mod action;
mod table;

pub use action::*;
pub use table::*;

/// The state's index in the LALR table.
pub type StateId = usize;
