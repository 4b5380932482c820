/// An inclusive interval of 16-bit character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterRange {
    pub start: u16,
    pub end: u16,
}

impl CharacterRange {
    pub fn new(start: u16, end: u16) -> Self {
        debug_assert!(start <= end, "inverted character range {start}..={end}");
        Self { start, end }
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.start as u32..=self.end as u32).contains(&code)
    }
}

impl From<std::ops::RangeInclusive<char>> for CharacterRange {
    fn from(value: std::ops::RangeInclusive<char>) -> Self {
        Self::new(*value.start() as u16, *value.end() as u16)
    }
}

impl From<char> for CharacterRange {
    fn from(value: char) -> Self {
        Self::new(value as u16, value as u16)
    }
}

/// The character set's index in the character set table.
pub type CharSetId = usize;

/// A set of chars, as a list of ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet(Vec<CharacterRange>);

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: CharacterRange) {
        self.0.push(range)
    }

    pub fn contains(&self, ch: char) -> bool {
        let code = ch as u32;
        self.0.iter().any(|range| range.contains(code))
    }

    pub fn ranges(&self) -> &[CharacterRange] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CharacterRange> for CharacterSet {
    fn from_iter<T: IntoIterator<Item = CharacterRange>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
