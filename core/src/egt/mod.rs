/*!
  The binary table file format.

  A table file starts with a null-terminated UTF-16LE header, followed by
  records. A record is the byte `M`, a little-endian 16-bit entry count
  and that many typed entries. The first entry of every record is a byte
  telling what the record describes.
*/
mod loader;
mod reader;
mod writer;

pub use loader::{load, RecordType};
pub use reader::EgtReader;
pub use writer::EgtWriter;

/// Header written in front of the table files this crate produces.
pub const FILE_HEADER: &str = "GOLD Parser Tables/v5.0";

/// Leading byte of a content record.
pub const RECORD_CONTENT_MULTI: u8 = b'M';

/// Type tag of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Empty = 69,
    /// Unsigned, 2 bytes, little-endian.
    UInt16 = 73,
    /// UTF-16LE, null-terminated.
    String = 83,
    /// 1 byte, 0 or 1.
    Boolean = 66,
    Byte = 98,
}

impl EntryType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for EntryType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            69 => Self::Empty,
            73 => Self::UInt16,
            83 => Self::String,
            66 => Self::Boolean,
            98 => Self::Byte,
            _ => return Err(value),
        })
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A typed value read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Empty,
    UInt16(u16),
    String(String),
    Boolean(bool),
    Byte(u8),
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        match self {
            Entry::Empty => EntryType::Empty,
            Entry::UInt16(_) => EntryType::UInt16,
            Entry::String(_) => EntryType::String,
            Entry::Boolean(_) => EntryType::Boolean,
            Entry::Byte(_) => EntryType::Byte,
        }
    }
}

impl From<u16> for Entry {
    fn from(value: u16) -> Self {
        Self::UInt16(value)
    }
}

impl From<bool> for Entry {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<u8> for Entry {
    fn from(value: u8) -> Self {
        Self::Byte(value)
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
