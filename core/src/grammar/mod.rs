//! The loaded grammar: every table the lexer and the parser run on.

use std::{io::Read, path::Path};

use crate::{
    dfa::Dfa,
    egt::{self, EgtWriter},
    lr::LrTable,
    Group, GroupId, Production, ProductionId, Symbol, SymbolId, SymbolKind, TablrResult,
};

mod builder;
mod properties;

pub use builder::{GrammarBuilder, TableCounts};
pub use properties::{GrammarProperties, PropertyIndex, PROPERTY_COUNT};

/// A complete set of parse tables.
///
/// Built once, then only read. Wrap it in an [`std::sync::Arc`] to share it
/// between parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) properties: GrammarProperties,
    pub(crate) counts: TableCounts,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) productions: Vec<Production>,
    pub(crate) dfa: Dfa,
    pub(crate) lr: LrTable,
    pub(crate) groups: Vec<Group>,
    /// Group owning each symbol, if any.
    pub(crate) symbol_groups: Vec<Option<GroupId>>,
    pub(crate) end: SymbolId,
    pub(crate) error: SymbolId,
}

impl Grammar {
    /// Load a grammar from a table file.
    pub fn load<P: AsRef<Path>>(path: P) -> TablrResult<Self> {
        let path = path.as_ref();
        log::debug!("loading tables from {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a grammar from a binary stream, read to its end.
    pub fn from_reader<R: Read>(mut reader: R) -> TablrResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> TablrResult<Self> {
        egt::load(data)
    }

    /// Encode the grammar in the table file format.
    pub fn write_to<W: std::io::Write>(&self, out: W) -> std::io::Result<()> {
        let mut writer = EgtWriter::new(out, egt::FILE_HEADER)?;
        writer.write_grammar(self)?;
        writer.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }

    pub fn properties(&self) -> &GrammarProperties {
        &self.properties
    }

    /// Table sizes as declared by the table file.
    pub fn table_counts(&self) -> TableCounts {
        self.counts
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(id)
    }

    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn lr(&self) -> &LrTable {
        &self.lr
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    /// The group a container, start or end symbol belongs to.
    pub fn group_of(&self, symbol: SymbolId) -> Option<&Group> {
        self.symbol_groups
            .get(symbol)
            .copied()
            .flatten()
            .and_then(|id| self.groups.get(id))
    }

    pub fn kind_of(&self, symbol: SymbolId) -> Option<SymbolKind> {
        self.symbols.get(symbol).map(|sym| sym.kind)
    }

    /// The symbol produced at the end of the input.
    pub fn end_symbol(&self) -> &Symbol {
        &self.symbols[self.end]
    }

    /// The symbol produced when the lexer does not recognize a character.
    pub fn error_symbol(&self) -> &Symbol {
        &self.symbols[self.error]
    }
}

impl AsRef<[Symbol]> for Grammar {
    fn as_ref(&self) -> &[Symbol] {
        &self.symbols
    }
}
