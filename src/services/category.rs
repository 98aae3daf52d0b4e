//! Category service
//!
//! Category management on top of the category repository: duplicate
//! detection on (name, type), in-use checks before deletion, and restoring
//! the default set.

use tracing::{debug, info, warn};

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Category, CategoryId, CategoryKind};
use crate::storage::{seed_defaults, Storage};

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// How many records refer to a category name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryUsage {
    pub transactions: usize,
    pub estimates: usize,
}

impl CategoryUsage {
    pub fn is_used(&self) -> bool {
        self.transactions > 0 || self.estimates > 0
    }
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn add(&self, name: &str, kind: CategoryKind) -> TallyResult<Category> {
        let mut category = Category::new(name.trim(), kind);
        category
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        if self.exists(&category.name, kind)? {
            warn!(name = %category.name, %kind, "duplicate category rejected");
            return Err(TallyError::DuplicateCategory {
                name: category.name,
                kind,
            });
        }

        category.id = self
            .storage
            .categories
            .add(category.clone())
            .map_err(|e| e.context("Failed to add category"))?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        );
        debug!(id = %category.id, name = %category.name, "category added");

        Ok(category)
    }

    /// Replace a category's name and type
    ///
    /// A category that transactions or estimates refer to keeps its name,
    /// since they refer to it by name.
    pub fn update(&self, id: CategoryId, name: &str, kind: CategoryKind) -> TallyResult<Category> {
        let before = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;

        let mut after = before.clone();
        after.rename(name.trim());
        after.kind = kind;
        after
            .validate()
            .map_err(|e| TallyError::Validation(e.to_string()))?;

        if let Some(existing) = self.storage.categories.find_by_name_and_kind(&after.name, kind)? {
            if existing.id != id {
                warn!(name = %after.name, %kind, "duplicate category rejected");
                return Err(TallyError::DuplicateCategory {
                    name: after.name,
                    kind,
                });
            }
        }

        if after.name != before.name {
            let usage = self.usage(&before.name)?;
            if usage.is_used() {
                warn!(name = %before.name, "rename of category in use rejected");
                return Err(TallyError::CategoryInUse {
                    name: before.name,
                    transactions: usage.transactions,
                    estimates: usage.estimates,
                });
            }
        }

        self.storage
            .categories
            .update(id, after.clone())
            .map_err(|e| e.context("Failed to update category"))?;

        self.storage.log_update(
            EntityType::Category,
            id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        );
        debug!(%id, name = %after.name, "category updated");

        Ok(after)
    }

    /// Delete a category that nothing refers to
    ///
    /// Returns the deleted category.
    pub fn delete(&self, id: CategoryId) -> TallyResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TallyError::category_not_found(id.to_string()))?;

        let usage = self.usage(&category.name)?;
        if usage.is_used() {
            warn!(
                name = %category.name,
                transactions = usage.transactions,
                estimates = usage.estimates,
                "delete of category in use rejected"
            );
            return Err(TallyError::CategoryInUse {
                name: category.name,
                transactions: usage.transactions,
                estimates: usage.estimates,
            });
        }

        self.storage
            .categories
            .delete(id)
            .map_err(|e| e.context("Failed to delete category"))?;

        if self.storage.categories.get(id)?.is_some() {
            return Err(TallyError::Storage(format!(
                "Category '{}' is still present after deletion",
                category.name
            )));
        }

        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.name.clone()),
            &category,
        );
        debug!(%id, name = %category.name, "category deleted");

        Ok(category)
    }

    /// Insert whichever default categories are missing
    ///
    /// Returns the inserted categories; an empty list when all were present.
    pub fn restore_defaults(&self) -> TallyResult<Vec<Category>> {
        let inserted = seed_defaults(&self.storage.categories)
            .map_err(|e| e.context("Failed to restore default categories"))?;

        for category in &inserted {
            self.storage.log_create(
                EntityType::Category,
                category.id.to_string(),
                Some(category.name.clone()),
                category,
            );
        }

        Ok(inserted)
    }

    /// List categories, optionally of one type
    ///
    /// An empty collection gets the defaults restored first.
    pub fn list(&self, kind: Option<CategoryKind>) -> TallyResult<Vec<Category>> {
        if self.storage.categories.count()? == 0 {
            info!("no categories found, restoring defaults");
            self.restore_defaults()?;
        }

        match kind {
            Some(kind) => self.storage.categories.find_by_kind(kind),
            None => self.storage.categories.get_all(),
        }
    }

    pub fn get(&self, id: CategoryId) -> TallyResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (expense first, then income) or by id
    pub fn find(&self, identifier: &str) -> TallyResult<Option<Category>> {
        for kind in [CategoryKind::Expense, CategoryKind::Income] {
            if let Some(category) = self
                .storage
                .categories
                .find_by_name_and_kind(identifier, kind)?
            {
                return Ok(Some(category));
            }
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// Whether a category with this name and type exists, ignoring case
    pub fn exists(&self, name: &str, kind: CategoryKind) -> TallyResult<bool> {
        Ok(self
            .storage
            .categories
            .find_by_name_and_kind(name, kind)?
            .is_some())
    }

    /// Count the transactions and estimates filed under a category name
    pub fn usage(&self, name: &str) -> TallyResult<CategoryUsage> {
        Ok(CategoryUsage {
            transactions: self.storage.transactions.count_by_category(name)?,
            estimates: self.storage.estimates.count_by_category(name)?,
        })
    }
}
