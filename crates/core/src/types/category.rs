//! Catalog categories and their fixed subcategory lists.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Furniture,
    Electronics,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 2] = [Self::Furniture, Self::Electronics];

    /// The wire name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Furniture => "furniture",
            Self::Electronics => "electronics",
        }
    }

    /// Subcategories that products in this category may use.
    #[must_use]
    pub const fn subcategories(self) -> &'static [&'static str] {
        match self {
            Self::Furniture => &["beds", "sofas", "chairs", "almirahs"],
            Self::Electronics => &["laptops", "smartphones", "tablets", "accessories"],
        }
    }

    /// Whether `subcategory` belongs to this category (exact match).
    #[must_use]
    pub fn has_subcategory(self, subcategory: &str) -> bool {
        self.subcategories().contains(&subcategory)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "furniture" => Ok(Self::Furniture),
            "electronics" => Ok(Self::Electronics),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}
