use serde::{Deserialize, Serialize};

use catalog_core::DomainError;

/// Product classification (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

/// Name → variant lookup table. Names are matched exactly (case-sensitive).
const CATEGORY_NAMES: [(&str, Category); 6] = [
    ("UNKNOWN", Category::Unknown),
    ("CLOTHS", Category::Cloths),
    ("FOOD", Category::Food),
    ("HOUSEWARES", Category::Housewares),
    ("AUTOMOTIVE", Category::Automotive),
    ("TOOLS", Category::Tools),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Canonical name, as stored and serialized.
    pub fn name(self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Category::Unknown => 0,
            Category::Cloths => 1,
            Category::Food => 2,
            Category::Housewares => 3,
            Category::Automotive => 4,
            Category::Tools => 5,
        }
    }

    /// Resolve a category by its exact name.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        CATEGORY_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
            .ok_or_else(|| DomainError::validation(format!("Invalid attribute: {name}")))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
