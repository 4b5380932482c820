use std::io::{self, Write};

use crate::{dfa::FaEdge, Grammar};

use super::{Entry, RecordType, RECORD_CONTENT_MULTI};

/// Encodes records in the table file format.
pub struct EgtWriter<W: Write> {
    out: W,
}

impl<W: Write> EgtWriter<W> {
    /// Write the file header.
    pub fn new(mut out: W, header: &str) -> io::Result<Self> {
        write_cstring(&mut out, header)?;
        Ok(Self { out })
    }

    pub fn write_record(&mut self, entries: &[Entry]) -> io::Result<()> {
        let count = u16::try_from(entries.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "too many entries in a record")
        })?;

        self.out.write_all(&[RECORD_CONTENT_MULTI])?;
        self.out.write_all(&count.to_le_bytes())?;
        entries.iter().try_for_each(|entry| write_entry(&mut self.out, entry))
    }

    /// Write every table of the grammar, in the order grammar compilers do.
    pub fn write_grammar(&mut self, grammar: &Grammar) -> io::Result<()> {
        for (index, value) in grammar.properties().iter() {
            self.write_record(&[
                RecordType::Property.into(),
                index_entry(index as usize)?,
                Entry::String(index.label().to_owned()),
                Entry::String(value.to_owned()),
            ])?;
        }

        let counts = grammar.table_counts();
        self.write_record(&[
            RecordType::TableCounts.into(),
            index_entry(counts.symbols)?,
            index_entry(counts.charsets)?,
            index_entry(counts.productions)?,
            index_entry(counts.dfa_states)?,
            index_entry(counts.lr_states)?,
            index_entry(counts.groups)?,
        ])?;

        self.write_record(&[
            RecordType::InitialStates.into(),
            index_entry(grammar.dfa().initial)?,
            index_entry(grammar.lr().initial)?,
        ])?;

        for sym in grammar.symbols() {
            self.write_record(&[
                RecordType::Symbol.into(),
                index_entry(sym.id)?,
                Entry::String(sym.name.clone()),
                Entry::UInt16(sym.kind.code()),
            ])?;
        }

        for group in grammar.groups() {
            let mut entries = vec![
                RecordType::Group.into(),
                index_entry(group.id)?,
                Entry::String(group.name.clone()),
                index_entry(group.container)?,
                index_entry(group.start)?,
                index_entry(group.end)?,
                Entry::UInt16(group.advance as u16),
                Entry::UInt16(group.ending as u16),
                Entry::Empty,
                index_entry(group.nesting.len())?,
            ];
            for nested in &group.nesting {
                entries.push(index_entry(*nested)?);
            }
            self.write_record(&entries)?;
        }

        for (index, set) in grammar.dfa().charsets.iter().enumerate() {
            let mut entries = vec![
                RecordType::CharRanges.into(),
                index_entry(index)?,
                // Code page, unused.
                Entry::UInt16(0),
                index_entry(set.ranges().len())?,
                Entry::Empty,
            ];
            for range in set.ranges() {
                entries.push(Entry::UInt16(range.start));
                entries.push(Entry::UInt16(range.end));
            }
            self.write_record(&entries)?;
        }

        for prod in grammar.productions() {
            let mut entries = vec![
                RecordType::Production.into(),
                index_entry(prod.id)?,
                index_entry(prod.head)?,
                Entry::Empty,
            ];
            for sym in &prod.handle {
                entries.push(index_entry(*sym)?);
            }
            self.write_record(&entries)?;
        }

        for (index, state) in grammar.dfa().states.iter().enumerate() {
            let mut entries = vec![
                RecordType::DfaState.into(),
                index_entry(index)?,
                Entry::Boolean(state.accept.is_some()),
                index_entry(state.accept.unwrap_or_default())?,
                Entry::Empty,
            ];
            for FaEdge { charset, target } in &state.edges {
                entries.push(index_entry(*charset)?);
                entries.push(index_entry(*target)?);
                entries.push(Entry::Empty);
            }
            self.write_record(&entries)?;
        }

        for (index, state) in grammar.lr().states.iter().enumerate() {
            let mut entries = vec![RecordType::LrState.into(), index_entry(index)?, Entry::Empty];
            for (sym, action) in state.iter() {
                let (code, target) = action.encode();
                entries.push(index_entry(*sym)?);
                entries.push(Entry::UInt16(code));
                entries.push(Entry::UInt16(target));
                entries.push(Entry::Empty);
            }
            self.write_record(&entries)?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn index_entry(index: usize) -> io::Result<Entry> {
    u16::try_from(index).map(Entry::UInt16).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("index {index} exceeds u16::MAX"),
        )
    })
}

fn write_cstring<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    for unit in text.encode_utf16() {
        out.write_all(&unit.to_le_bytes())?;
    }
    out.write_all(&[0, 0])
}

fn write_entry<W: Write>(out: &mut W, entry: &Entry) -> io::Result<()> {
    out.write_all(&[entry.entry_type().tag()])?;

    match entry {
        Entry::Empty => Ok(()),
        Entry::UInt16(value) => out.write_all(&value.to_le_bytes()),
        Entry::String(value) => write_cstring(out, value),
        Entry::Boolean(value) => out.write_all(&[*value as u8]),
        Entry::Byte(value) => out.write_all(&[*value]),
    }
}
