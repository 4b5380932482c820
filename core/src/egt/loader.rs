use crate::{
    dfa::{CharacterRange, CharacterSet, FaEdge, FaState},
    grammar::{GrammarBuilder, TableCounts},
    lr::{Action, LrState},
    AdvanceMode, EndingMode, ErrorKind, Grammar, Group, Production, Symbol, SymbolKind, TablrError, TablrResult,
};

use super::{EgtReader, Entry};

/// What a record describes, given by its first entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    InitialStates = 73,
    Symbol = 83,
    Production = 82,
    DfaState = 68,
    LrState = 76,
    Property = 112,
    CharRanges = 99,
    Group = 103,
    TableCounts = 116,
}

impl TryFrom<u8> for RecordType {
    type Error = ErrorKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            b'I' => Self::InitialStates,
            b'S' => Self::Symbol,
            b'R' => Self::Production,
            b'D' => Self::DfaState,
            b'L' => Self::LrState,
            b'p' => Self::Property,
            b'c' => Self::CharRanges,
            b'g' => Self::Group,
            b't' => Self::TableCounts,
            _ => return Err(ErrorKind::UnknownRecord(value)),
        })
    }
}

impl From<RecordType> for Entry {
    fn from(value: RecordType) -> Self {
        Entry::Byte(value as u8)
    }
}

/// Load a grammar from the bytes of a table file.
///
/// Either every table is loaded, or nothing is.
pub fn load(data: &[u8]) -> TablrResult<Grammar> {
    let mut reader = EgtReader::open(data)?;
    let mut builder = GrammarBuilder::new();

    while !reader.end_of_file() {
        if !reader.next_record()? {
            break;
        }
        read_record(&mut reader, &mut builder)?;
    }

    let grammar = builder
        .build()
        .map_err(|kind| TablrError::new(kind, Some(reader.offset())))?;

    log::debug!(
        "loaded tables \"{}\": {} symbols, {} productions, {} DFA states, {} LALR states, {} groups",
        reader.header(),
        grammar.symbols().len(),
        grammar.productions().len(),
        grammar.dfa().states.len(),
        grammar.lr().len(),
        grammar.groups().len(),
    );

    Ok(grammar)
}

/// Attach the cursor offset to an error raised while decoding a record.
fn at(reader: &EgtReader<'_>) -> impl Fn(ErrorKind) -> TablrError {
    let offset = reader.offset();
    move |kind| TablrError::new(kind, Some(offset))
}

fn read_record(reader: &mut EgtReader<'_>, builder: &mut GrammarBuilder) -> TablrResult<()> {
    let record = RecordType::try_from(reader.retrieve_byte()?).map_err(at(reader))?;
    log::trace!("record {:?} at {}", record, reader.offset());

    match record {
        RecordType::Property => {
            // Index, Name, Value
            let index = reader.retrieve_index()?;
            reader.retrieve_string()?;
            let value = reader.retrieve_string()?;
            builder.property(index, value);
        }

        RecordType::TableCounts => {
            // Symbol, CharacterSet, Rule, DFA, LALR, Group
            let counts = TableCounts {
                symbols: reader.retrieve_index()?,
                charsets: reader.retrieve_index()?,
                productions: reader.retrieve_index()?,
                dfa_states: reader.retrieve_index()?,
                lr_states: reader.retrieve_index()?,
                groups: reader.retrieve_index()?,
            };
            builder.table_counts(counts);
        }

        RecordType::InitialStates => {
            // DFA, LALR
            let dfa = reader.retrieve_index()?;
            let lr = reader.retrieve_index()?;
            builder.initial_states(dfa, lr);
        }

        RecordType::Symbol => {
            // #, Name, Kind
            let index = reader.retrieve_index()?;
            let name = reader.retrieve_string()?;
            let kind = SymbolKind::try_from(reader.retrieve_u16()?).map_err(at(reader))?;
            builder
                .symbol(Symbol::new(index, name, kind))
                .map_err(at(reader))?;
        }

        RecordType::Group => {
            // #, Name, Container#, Start#, End#, Advance, Ending, Reserved, Count, (Nested#...)
            let id = reader.retrieve_index()?;
            let name = reader.retrieve_string()?;
            let container = reader.retrieve_index()?;
            let start = reader.retrieve_index()?;
            let end = reader.retrieve_index()?;
            let advance = AdvanceMode::try_from(reader.retrieve_u16()?).map_err(at(reader))?;
            let ending = EndingMode::try_from(reader.retrieve_u16()?).map_err(at(reader))?;
            reader.retrieve_entry()?;

            let count = reader.retrieve_index()?;
            let nesting = (0..count)
                .map(|_| reader.retrieve_index())
                .collect::<TablrResult<Vec<_>>>()?;

            builder
                .group(Group {
                    id,
                    name,
                    container,
                    start,
                    end,
                    advance,
                    ending,
                    nesting,
                })
                .map_err(at(reader))?;
        }

        RecordType::CharRanges => {
            // #, Code page, Total ranges, Reserved, (Start, End)...
            let index = reader.retrieve_index()?;
            reader.retrieve_u16()?;
            reader.retrieve_u16()?;
            reader.retrieve_entry()?;

            let mut set = CharacterSet::new();
            while !reader.record_complete() {
                let start = reader.retrieve_u16()?;
                let end = reader.retrieve_u16()?;
                set.push(CharacterRange { start, end });
            }
            builder.charset(index, set).map_err(at(reader))?;
        }

        RecordType::Production => {
            // #, Head#, Reserved, (Symbol#...)
            let index = reader.retrieve_index()?;
            let head = reader.retrieve_index()?;
            reader.retrieve_entry()?;

            let mut handle = Vec::new();
            while !reader.record_complete() {
                handle.push(reader.retrieve_index()?);
            }
            builder
                .production(Production::new(index, head, handle))
                .map_err(at(reader))?;
        }

        RecordType::DfaState => {
            // #, Accept?, Accept#, Reserved, (CharSet#, Target#, Reserved)...
            let index = reader.retrieve_index()?;
            let accepting = reader.retrieve_bool()?;
            let accept = reader.retrieve_index()?;
            reader.retrieve_entry()?;

            let mut edges = Vec::new();
            while !reader.record_complete() {
                let charset = reader.retrieve_index()?;
                let target = reader.retrieve_index()?;
                reader.retrieve_entry()?;
                edges.push(FaEdge::new(charset, target));
            }

            let state = FaState::new(accepting.then_some(accept), edges);
            builder.dfa_state(index, state).map_err(at(reader))?;
        }

        RecordType::LrState => {
            // #, Reserved, (Symbol#, Action, Target#, Reserved)...
            let index = reader.retrieve_index()?;
            reader.retrieve_entry()?;

            let mut state = LrState::default();
            while !reader.record_complete() {
                let symbol = reader.retrieve_index()?;
                let code = reader.retrieve_u16()?;
                let target = reader.retrieve_u16()?;
                reader.retrieve_entry()?;
                state.push(symbol, Action::decode(code, target).map_err(at(reader))?);
            }
            builder.lr_state(index, state).map_err(at(reader))?;
        }
    }

    Ok(())
}
