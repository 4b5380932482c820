use crate::{ErrorKind, TablrError, TablrResult};

use super::{Entry, EntryType, RECORD_CONTENT_MULTI};

/// Cursor over the records of a table file.
///
/// The reader only decodes typed entries, it knows nothing of what the
/// records mean.
#[derive(Debug)]
pub struct EgtReader<'data> {
    data: &'data [u8],
    offset: usize,
    header: String,
    entry_count: usize,
    entries_read: usize,
}

impl<'data> EgtReader<'data> {
    /// Read the file header and position the cursor on the first record.
    pub fn open(data: &'data [u8]) -> TablrResult<Self> {
        let mut reader = Self {
            data,
            offset: 0,
            header: String::new(),
            entry_count: 0,
            entries_read: 0,
        };

        reader.header = reader.read_cstring()?;
        Ok(reader)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn end_of_file(&self) -> bool {
        self.offset == self.data.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn record_complete(&self) -> bool {
        self.entries_read >= self.entry_count
    }

    fn error(&self, kind: ErrorKind) -> TablrError {
        TablrError::new(kind, Some(self.offset))
    }

    fn read_u8(&mut self) -> TablrResult<u8> {
        let byte = self
            .data
            .get(self.offset)
            .copied()
            .ok_or_else(|| self.error(ErrorKind::UnexpectedEof { offset: self.offset }))?;
        self.offset += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> TablrResult<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    fn read_cstring(&mut self) -> TablrResult<String> {
        let mut units = Vec::new();
        loop {
            match self.read_u16()? {
                0 => break,
                unit => units.push(unit),
            }
        }
        Ok(String::from_utf16_lossy(&units))
    }

    /// Skip what is left of the current record, then start the next one.
    ///
    /// Returns `false` when the next byte does not begin a content record.
    pub fn next_record(&mut self) -> TablrResult<bool> {
        while !self.record_complete() {
            self.retrieve_entry()?;
        }

        if self.read_u8()? != RECORD_CONTENT_MULTI {
            return Ok(false);
        }

        self.entry_count = self.read_u16()? as usize;
        self.entries_read = 0;
        Ok(true)
    }

    /// Read the next entry of the record, [`Entry::Empty`] once it is complete.
    pub fn retrieve_entry(&mut self) -> TablrResult<Entry> {
        if self.record_complete() {
            return Ok(Entry::Empty);
        }

        self.entries_read += 1;
        let offset = self.offset;
        let tag = self.read_u8()?;
        let entry_type = EntryType::try_from(tag)
            .map_err(|tag| TablrError::new(ErrorKind::UnknownEntryType { tag, offset }, Some(offset)))?;

        Ok(match entry_type {
            EntryType::Empty => Entry::Empty,
            EntryType::Boolean => Entry::Boolean(self.read_u8()? == 1),
            EntryType::UInt16 => Entry::UInt16(self.read_u16()?),
            EntryType::String => Entry::String(self.read_cstring()?),
            EntryType::Byte => Entry::Byte(self.read_u8()?),
        })
    }

    fn mismatch(&self, expected: EntryType, found: &Entry) -> TablrError {
        self.error(ErrorKind::TypeMismatch {
            expected,
            found: found.entry_type(),
            offset: self.offset,
        })
    }

    pub fn retrieve_string(&mut self) -> TablrResult<String> {
        match self.retrieve_entry()? {
            Entry::String(value) => Ok(value),
            other => Err(self.mismatch(EntryType::String, &other)),
        }
    }

    pub fn retrieve_u16(&mut self) -> TablrResult<u16> {
        match self.retrieve_entry()? {
            Entry::UInt16(value) => Ok(value),
            other => Err(self.mismatch(EntryType::UInt16, &other)),
        }
    }

    /// A 16-bit entry used as a table index or count.
    pub fn retrieve_index(&mut self) -> TablrResult<usize> {
        self.retrieve_u16().map(usize::from)
    }

    pub fn retrieve_bool(&mut self) -> TablrResult<bool> {
        match self.retrieve_entry()? {
            Entry::Boolean(value) => Ok(value),
            other => Err(self.mismatch(EntryType::Boolean, &other)),
        }
    }

    pub fn retrieve_byte(&mut self) -> TablrResult<u8> {
        match self.retrieve_entry()? {
            Entry::Byte(value) => Ok(value),
            other => Err(self.mismatch(EntryType::Byte, &other)),
        }
    }
}
