//! Category model
//!
//! Transactions and estimates refer to categories by name, so a category's
//! name is its public key; the numeric id only addresses the record itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Which side of the ledger a category applies to
///
/// Only expense categories are seeded or created by default. Income
/// categories are accepted and kept unique on their own, but nothing else
/// treats the two kinds symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    #[default]
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!(
                "Unknown category type '{}', expected 'expense' or 'income'",
                other
            )),
        }
    }
}

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier assigned by the store
    #[serde(default)]
    pub id: CategoryId,

    /// Category name, unique per kind ignoring case
    pub name: String,

    /// Expense or income
    #[serde(rename = "type", default)]
    pub kind: CategoryKind,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new, not yet stored, category
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::UNASSIGNED,
            name: name.into(),
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Key used to enforce (name, kind) uniqueness
    pub fn unique_key(&self) -> String {
        unique_key(&self.name, self.kind)
    }

    /// Case-insensitive match on name and kind
    pub fn matches(&self, name: &str, kind: CategoryKind) -> bool {
        self.kind == kind && self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Rename the category
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

/// Normalised "name:kind" key
pub fn unique_key(name: &str, kind: CategoryKind) -> String {
    format!("{}:{}", name.trim().to_lowercase(), kind)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The seed set inserted into an empty category collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Food,
    Transport,
    Housing,
    Health,
    Education,
    Leisure,
}

impl DefaultCategory {
    /// All seed categories in insertion order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Housing,
            Self::Health,
            Self::Education,
            Self::Leisure,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Leisure => "Leisure",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        CategoryKind::Expense
    }

    pub fn to_category(&self) -> Category {
        Category::new(self.name(), self.kind())
    }
}

/// Human-readable label for a category name
///
/// Older records store short slugs ("food", "transport", ...). Those map to
/// display names; anything else is shown as stored.
pub fn display_name(category: &str) -> &str {
    match category {
        "food" => "Food",
        "transport" => "Transport",
        "entertainment" => "Entertainment",
        "housing" => "Housing",
        "utilities" => "Utilities",
        "health" => "Health",
        "education" => "Education",
        "shopping" => "Shopping",
        "other" => "Other",
        other => other,
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", CategoryKind::Expense);
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.kind, CategoryKind::Expense);
        assert_eq!(category.id, CategoryId::UNASSIGNED);
    }

    #[test]
    fn test_matches_ignores_case_but_not_kind() {
        let category = Category::new("Groceries", CategoryKind::Expense);
        assert!(category.matches("groceries", CategoryKind::Expense));
        assert!(category.matches(" GROCERIES ", CategoryKind::Expense));
        assert!(!category.matches("groceries", CategoryKind::Income));
    }

    #[test]
    fn test_unique_key() {
        let a = Category::new("Food", CategoryKind::Expense);
        let b = Category::new("food ", CategoryKind::Expense);
        let c = Category::new("Food", CategoryKind::Income);
        assert_eq!(a.unique_key(), b.unique_key());
        assert_ne!(a.unique_key(), c.unique_key());
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new("Valid", CategoryKind::Expense);
        assert!(category.validate().is_ok());

        category.name = "   ".into();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_default_categories() {
        let defaults = DefaultCategory::all();
        assert_eq!(defaults.len(), 6);
        assert_eq!(defaults[0].name(), "Food");
        assert!(defaults.iter().all(|d| d.kind() == CategoryKind::Expense));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("food"), "Food");
        assert_eq!(display_name("entertainment"), "Entertainment");
        assert_eq!(display_name("Gym"), "Gym");
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let category = Category::new("Salary", CategoryKind::Income);
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["type"], "income");
    }
}
