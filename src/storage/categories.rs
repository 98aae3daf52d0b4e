//! Category repository
//!
//! Stores categories in categories.json. Names are unique per kind ignoring
//! case, enforced through the `name_type` unique index.

use std::path::PathBuf;

use tracing::info;

use crate::error::{TallyError, TallyResult};
use crate::models::category::unique_key;
use crate::models::{Category, CategoryId, CategoryKind, DefaultCategory};

use super::collection::{Collection, Record};

pub(crate) const BY_TYPE: &str = "type";
pub(crate) const UNIQUE_NAME_TYPE: &str = "name_type";

impl Record for Category {
    type Id = CategoryId;
    const ENTITY: &'static str = "Category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn assign_id(&mut self, id: CategoryId) {
        self.id = id;
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![(BY_TYPE, self.kind.as_str().to_string())]
    }

    fn unique_entries(&self) -> Vec<(&'static str, String)> {
        vec![(UNIQUE_NAME_TYPE, self.unique_key())]
    }

    fn conflict_error(&self, _index: &'static str) -> TallyError {
        TallyError::DuplicateCategory {
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// Repository for category persistence
pub struct CategoryRepository {
    records: Collection<Category>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            records: Collection::new(path),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.records.is_ready()
    }

    pub fn create_if_missing(&self) -> TallyResult<bool> {
        self.records.create_if_missing()
    }

    pub fn load(&self) -> TallyResult<()> {
        self.records.load()
    }

    /// Store a new category; fails with `DuplicateCategory` on a name+type clash
    pub fn add(&self, category: Category) -> TallyResult<CategoryId> {
        self.records.add(category)
    }

    pub fn get(&self, id: CategoryId) -> TallyResult<Option<Category>> {
        self.records.get(id)
    }

    pub fn get_all(&self) -> TallyResult<Vec<Category>> {
        self.records.get_all()
    }

    pub fn update(&self, id: CategoryId, category: Category) -> TallyResult<()> {
        self.records.update(id, category)
    }

    pub fn delete(&self, id: CategoryId) -> TallyResult<bool> {
        self.records.delete(id)
    }

    pub fn count(&self) -> TallyResult<usize> {
        self.records.count()
    }

    pub fn find_by_kind(&self, kind: CategoryKind) -> TallyResult<Vec<Category>> {
        self.records.find_by_index(BY_TYPE, kind.as_str())
    }

    /// The category with this name and kind, ignoring case
    pub fn find_by_name_and_kind(
        &self,
        name: &str,
        kind: CategoryKind,
    ) -> TallyResult<Option<Category>> {
        self.records
            .find_unique(UNIQUE_NAME_TYPE, &unique_key(name, kind))
    }
}

/// Insert every default category whose name+type is not already present
///
/// Returns the categories that were inserted, in seed order.
pub fn seed_defaults(repo: &CategoryRepository) -> TallyResult<Vec<Category>> {
    let mut inserted = Vec::new();

    for default in DefaultCategory::all() {
        if repo
            .find_by_name_and_kind(default.name(), default.kind())?
            .is_some()
        {
            continue;
        }

        let mut category = default.to_category();
        category.id = repo.add(category.clone())?;
        inserted.push(category);
    }

    if !inserted.is_empty() {
        info!(count = inserted.len(), "default categories inserted");
    }

    Ok(inserted)
}
