/// Number of properties a table file may define.
pub const PROPERTY_COUNT: usize = 8;

/// Index of each well-known grammar property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyIndex {
    Name = 0,
    Version = 1,
    Author = 2,
    About = 3,
    CharacterSet = 4,
    CharacterMapping = 5,
    GeneratedBy = 6,
    GeneratedDate = 7,
}

impl PropertyIndex {
    pub const ALL: [PropertyIndex; PROPERTY_COUNT] = [
        Self::Name,
        Self::Version,
        Self::Author,
        Self::About,
        Self::CharacterSet,
        Self::CharacterMapping,
        Self::GeneratedBy,
        Self::GeneratedDate,
    ];

    /// Property name as written by grammar compilers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Version => "Version",
            Self::Author => "Author",
            Self::About => "About",
            Self::CharacterSet => "Character Set",
            Self::CharacterMapping => "Character Mapping",
            Self::GeneratedBy => "Generated By",
            Self::GeneratedDate => "Generated Date",
        }
    }
}

/// Metadata about the grammar the tables were compiled from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrammarProperties {
    values: [String; PROPERTY_COUNT],
}

impl GrammarProperties {
    /// Set a property by its table index, unknown indices are ignored.
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn get(&self, index: PropertyIndex) -> &str {
        &self.values[index as usize]
    }

    pub fn name(&self) -> &str {
        self.get(PropertyIndex::Name)
    }

    pub fn version(&self) -> &str {
        self.get(PropertyIndex::Version)
    }

    pub fn author(&self) -> &str {
        self.get(PropertyIndex::Author)
    }

    pub fn about(&self) -> &str {
        self.get(PropertyIndex::About)
    }

    pub fn character_set(&self) -> &str {
        self.get(PropertyIndex::CharacterSet)
    }

    pub fn character_mapping(&self) -> &str {
        self.get(PropertyIndex::CharacterMapping)
    }

    pub fn generated_by(&self) -> &str {
        self.get(PropertyIndex::GeneratedBy)
    }

    pub fn generated_date(&self) -> &str {
        self.get(PropertyIndex::GeneratedDate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyIndex, &str)> {
        PropertyIndex::ALL
            .into_iter()
            .map(|index| (index, self.get(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut props = GrammarProperties::default();
        props.set(0, "Boolean");
        props.set(7, "2024-01-01");
        props.set(8, "ignored");

        assert_eq!(props.name(), "Boolean");
        assert_eq!(props.generated_date(), "2024-01-01");
        assert_eq!(props.author(), "");
        assert_eq!(props.iter().count(), PROPERTY_COUNT);
    }
}
