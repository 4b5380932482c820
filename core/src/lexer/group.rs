use crate::{AdvanceMode, EndingMode, Grammar, Group, SymbolKind, Token};

use super::{Lexer, OpenGroup};

impl<V> Lexer<V> {
    /// The group `token` opens, if it may open one here.
    ///
    /// At top level any group start opens its group; inside a group only the
    /// groups it allows to nest do.
    fn opened_group<'g>(&self, grammar: &'g Grammar, token: &Token<V>) -> Option<&'g Group> {
        if grammar.kind_of(token.symbol) != Some(SymbolKind::GroupStart) {
            return None;
        }

        let group = grammar.group_of(token.symbol)?;
        match self.groups.last() {
            None => Some(group),
            Some(open) => grammar.groups()[open.group]
                .can_nest(group.id)
                .then_some(group),
        }
    }

    /// Next token for the parser, with groups folded into single tokens.
    ///
    /// A group token keeps the position of its start and is labelled with the
    /// group's container symbol. The end of the input inside a group is
    /// returned as is, the open groups are left on the stack.
    pub fn produce_token(&mut self, grammar: &Grammar) -> Token<V> {
        loop {
            let read = self.next_raw(grammar);
            let text = read.as_text().unwrap_or_default().to_owned();
            let len = text.chars().count();

            if let Some(group) = self.opened_group(grammar, &read) {
                log::trace!("open group {} at {}", group.name, read.position);
                self.consume(len);
                self.groups.push(OpenGroup {
                    group: group.id,
                    token: read,
                });
                continue;
            }

            let Some(top) = self.groups.last() else {
                self.consume(len);
                return read;
            };
            let group = &grammar.groups()[top.group];

            if read.symbol == group.end {
                if let Some(mut closed) = self.groups.pop() {
                    if group.ending == EndingMode::Closed {
                        closed.token.push_text(&text);
                        self.consume(len);
                    }

                    match self.groups.last_mut() {
                        None => {
                            log::trace!("close group {}", group.name);
                            closed.token.symbol = group.container;
                            return closed.token;
                        }
                        Some(outer) => {
                            if let Some(inner) = closed.token.as_text() {
                                outer.token.push_text(inner);
                            }
                        }
                    }
                }
            } else if read.symbol == grammar.end_symbol().id {
                return read;
            } else {
                let taken = match group.advance {
                    AdvanceMode::Token => text,
                    AdvanceMode::Character => text.chars().take(1).collect(),
                };
                let taken_len = taken.chars().count();

                if let Some(top) = self.groups.last_mut() {
                    top.token.push_text(&taken);
                }
                self.consume(taken_len);
            }
        }
    }
}
