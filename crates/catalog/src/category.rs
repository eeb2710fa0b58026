use serde::{Deserialize, Serialize};

/// Menu category of a catalog item.
///
/// Only the drink categories carry behaviour (they are exempt from packaging accounting);
/// every other category is kept verbatim for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Drinks,
    StaffDrinks,
    Other(String),
}

impl Category {
    pub const DRINKS_LABEL: &'static str = "Drinks";
    pub const STAFF_DRINKS_LABEL: &'static str = "Staff Drinks";

    /// Parse a catalog cell. Matching is trimmed and case-insensitive.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(Self::DRINKS_LABEL) {
            Category::Drinks
        } else if trimmed.eq_ignore_ascii_case(Self::STAFF_DRINKS_LABEL) {
            Category::StaffDrinks
        } else {
            Category::Other(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Drinks => Self::DRINKS_LABEL,
            Category::StaffDrinks => Self::STAFF_DRINKS_LABEL,
            Category::Other(label) => label,
        }
    }

    /// Drinks are served in their own bottle/can and never consume packaging.
    pub fn is_packaging_exempt(&self) -> bool {
        matches!(self, Category::Drinks | Category::StaffDrinks)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
