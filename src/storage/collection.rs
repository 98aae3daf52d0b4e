//! Generic keyed collection backed by a JSON file
//!
//! Each collection owns one file holding its records and the next id to hand
//! out. Records get ids from a counter that only moves forward, so deleted
//! ids are never reused. Secondary indexes are rebuilt on load and kept in
//! step with every mutation.
//!
//! A collection is unusable until [`Collection::load`] has run; every other
//! operation fails with [`TallyError::StorageNotReady`] before that.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{TallyError, TallyResult};
use crate::models::RecordKey;

use super::file_io::{read_json, write_json_atomic};

const FIRST_ID: u64 = 1;

/// A record kind that can live in a [`Collection`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: RecordKey;

    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    fn assign_id(&mut self, id: Self::Id);

    /// `(index name, value)` pairs this record is findable under
    fn index_entries(&self) -> Vec<(&'static str, String)>;

    /// `(index name, key)` pairs that must be unique across the collection
    fn unique_entries(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Error reported when this record collides on a unique index
    fn conflict_error(&self, index: &'static str) -> TallyError {
        TallyError::Storage(format!(
            "{} violates unique index '{}'",
            Self::ENTITY,
            index
        ))
    }
}

/// On-disk layout of a collection
#[derive(Deserialize)]
struct CollectionFile<R> {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<R> Default for CollectionFile<R> {
    fn default() -> Self {
        Self {
            next_id: FIRST_ID,
            records: Vec::new(),
        }
    }
}

fn first_id() -> u64 {
    FIRST_ID
}

#[derive(Serialize)]
struct CollectionSnapshot<'a, R> {
    next_id: u64,
    records: Vec<&'a R>,
}

struct CollectionState<R: Record> {
    next_id: u64,
    records: BTreeMap<R::Id, R>,
    indexes: HashMap<&'static str, HashMap<String, BTreeSet<R::Id>>>,
    unique: HashMap<&'static str, HashMap<String, R::Id>>,
}

impl<R: Record> CollectionState<R> {
    fn new(next_id: u64) -> Self {
        Self {
            next_id: next_id.max(FIRST_ID),
            records: BTreeMap::new(),
            indexes: HashMap::new(),
            unique: HashMap::new(),
        }
    }

    /// First unique index the record would collide on, ignoring `except`
    fn conflict(&self, record: &R, except: Option<R::Id>) -> Option<&'static str> {
        record.unique_entries().into_iter().find_map(|(name, key)| {
            let holder = self.unique.get(name).and_then(|keys| keys.get(&key))?;
            if Some(*holder) == except {
                None
            } else {
                Some(name)
            }
        })
    }

    fn insert(&mut self, record: R) {
        let id = record.id();
        for (name, value) in record.index_entries() {
            self.indexes
                .entry(name)
                .or_default()
                .entry(value)
                .or_default()
                .insert(id);
        }
        for (name, key) in record.unique_entries() {
            self.unique.entry(name).or_default().insert(key, id);
        }
        self.records.insert(id, record);
    }

    fn remove(&mut self, id: R::Id) -> Option<R> {
        let record = self.records.remove(&id)?;
        for (name, value) in record.index_entries() {
            if let Some(values) = self.indexes.get_mut(name) {
                if let Some(ids) = values.get_mut(&value) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        values.remove(&value);
                    }
                }
            }
        }
        for (name, key) in record.unique_entries() {
            if let Some(keys) = self.unique.get_mut(name) {
                if keys.get(&key) == Some(&id) {
                    keys.remove(&key);
                }
            }
        }
        Some(record)
    }

    fn snapshot(&self) -> CollectionSnapshot<'_, R> {
        CollectionSnapshot {
            next_id: self.next_id,
            records: self.records.values().collect(),
        }
    }
}

/// A persistent, indexed collection of one record kind
pub struct Collection<R: Record> {
    path: PathBuf,
    state: RwLock<Option<CollectionState<R>>>,
}

impl<R: Record> Collection<R> {
    /// Create a collection bound to a file; nothing is read until `load`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(None),
        }
    }

    /// Whether `load` has completed
    pub fn is_ready(&self) -> bool {
        self.state.read().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Write an empty collection file if none exists yet
    ///
    /// Returns whether a file was created.
    pub fn create_if_missing(&self) -> TallyResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        let empty: CollectionSnapshot<'_, R> = CollectionSnapshot {
            next_id: FIRST_ID,
            records: Vec::new(),
        };
        write_json_atomic(&self.path, &empty)?;
        Ok(true)
    }

    /// Load records from disk and rebuild indexes
    pub fn load(&self) -> TallyResult<()> {
        let file: CollectionFile<R> = read_json(&self.path)?;
        let mut state = CollectionState::new(file.next_id);

        for record in file.records {
            let id = record.id();
            if state.records.contains_key(&id) {
                return Err(TallyError::Storage(format!(
                    "{} contains {} {} twice",
                    self.path.display(),
                    R::ENTITY,
                    id
                )));
            }
            if let Some(index) = state.conflict(&record, None) {
                return Err(TallyError::Storage(format!(
                    "{} has conflicting records on unique index '{}'",
                    self.path.display(),
                    index
                )));
            }
            state.next_id = state.next_id.max(id.raw() + 1);
            state.insert(record);
        }

        debug!(
            entity = R::ENTITY,
            records = state.records.len(),
            next_id = state.next_id,
            "collection loaded"
        );
        *self.write_state()? = Some(state);
        Ok(())
    }

    /// Store a new record under a fresh id and return that id
    ///
    /// Any id already carried by `record` is ignored.
    pub fn add(&self, mut record: R) -> TallyResult<R::Id> {
        let mut guard = self.write_state()?;
        let state = guard.as_mut().ok_or(TallyError::StorageNotReady)?;

        if let Some(index) = state.conflict(&record, None) {
            return Err(record.conflict_error(index));
        }

        let id = R::Id::from_raw(state.next_id);
        state.next_id += 1;
        record.assign_id(id);
        state.insert(record);

        if let Err(e) = self.persist(state) {
            state.remove(id);
            return Err(e);
        }

        debug!(entity = R::ENTITY, %id, "record added");
        Ok(id)
    }

    /// Replace every field of an existing record, keeping its id
    pub fn update(&self, id: R::Id, mut record: R) -> TallyResult<()> {
        let mut guard = self.write_state()?;
        let state = guard.as_mut().ok_or(TallyError::StorageNotReady)?;

        if !state.records.contains_key(&id) {
            return Err(TallyError::NotFound {
                entity_type: R::ENTITY,
                identifier: id.to_string(),
            });
        }

        record.assign_id(id);
        if let Some(index) = state.conflict(&record, Some(id)) {
            return Err(record.conflict_error(index));
        }

        let previous = state.remove(id);
        state.insert(record);

        if let Err(e) = self.persist(state) {
            state.remove(id);
            if let Some(previous) = previous {
                state.insert(previous);
            }
            return Err(e);
        }

        debug!(entity = R::ENTITY, %id, "record updated");
        Ok(())
    }

    /// Remove a record; a missing id is not an error
    ///
    /// Returns whether a record was removed.
    pub fn delete(&self, id: R::Id) -> TallyResult<bool> {
        let mut guard = self.write_state()?;
        let state = guard.as_mut().ok_or(TallyError::StorageNotReady)?;

        let Some(removed) = state.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(state) {
            state.insert(removed);
            return Err(e);
        }

        debug!(entity = R::ENTITY, %id, "record deleted");
        Ok(true)
    }

    pub fn get(&self, id: R::Id) -> TallyResult<Option<R>> {
        self.with_state(|state| state.records.get(&id).cloned())
    }

    /// All records in id order
    pub fn get_all(&self) -> TallyResult<Vec<R>> {
        self.with_state(|state| state.records.values().cloned().collect())
    }

    /// Records whose `index` entry equals `value`, in id order
    pub fn find_by_index(&self, index: &str, value: &str) -> TallyResult<Vec<R>> {
        self.with_state(|state| {
            state
                .indexes
                .get(index)
                .and_then(|values| values.get(value))
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| state.records.get(id).cloned())
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    /// Number of records whose `index` entry equals `value`
    pub fn count_by_index(&self, index: &str, value: &str) -> TallyResult<usize> {
        self.with_state(|state| {
            state
                .indexes
                .get(index)
                .and_then(|values| values.get(value))
                .map_or(0, BTreeSet::len)
        })
    }

    /// The record holding `key` on a unique index
    pub fn find_unique(&self, index: &str, key: &str) -> TallyResult<Option<R>> {
        self.with_state(|state| {
            state
                .unique
                .get(index)
                .and_then(|keys| keys.get(key))
                .and_then(|id| state.records.get(id).cloned())
        })
    }

    pub fn count(&self) -> TallyResult<usize> {
        self.with_state(|state| state.records.len())
    }

    fn persist(&self, state: &CollectionState<R>) -> TallyResult<()> {
        write_json_atomic(&self.path, &state.snapshot())
    }

    fn with_state<T>(&self, f: impl FnOnce(&CollectionState<R>) -> T) -> TallyResult<T> {
        let guard = self.read_state()?;
        let state = guard.as_ref().ok_or(TallyError::StorageNotReady)?;
        Ok(f(state))
    }

    fn read_state(&self) -> TallyResult<RwLockReadGuard<'_, Option<CollectionState<R>>>> {
        self.state
            .read()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_state(&self) -> TallyResult<RwLockWriteGuard<'_, Option<CollectionState<R>>>> {
        self.state
            .write()
            .map_err(|e| TallyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Label {
        id: CategoryId,
        text: String,
        colour: String,
    }

    impl Label {
        fn new(text: &str, colour: &str) -> Self {
            Self {
                id: CategoryId::UNASSIGNED,
                text: text.into(),
                colour: colour.into(),
            }
        }
    }

    impl Record for Label {
        type Id = CategoryId;
        const ENTITY: &'static str = "Label";

        fn id(&self) -> CategoryId {
            self.id
        }

        fn assign_id(&mut self, id: CategoryId) {
            self.id = id;
        }

        fn index_entries(&self) -> Vec<(&'static str, String)> {
            vec![("colour", self.colour.clone())]
        }

        fn unique_entries(&self) -> Vec<(&'static str, String)> {
            vec![("text", self.text.to_lowercase())]
        }
    }

    fn create_test_collection() -> (TempDir, Collection<Label>) {
        let temp_dir = TempDir::new().unwrap();
        let collection = Collection::new(temp_dir.path().join("labels.json"));
        collection.load().unwrap();
        (temp_dir, collection)
    }

    #[test]
    fn test_operations_fail_before_load() {
        let temp_dir = TempDir::new().unwrap();
        let collection: Collection<Label> = Collection::new(temp_dir.path().join("labels.json"));

        assert!(!collection.is_ready());
        assert!(matches!(
            collection.add(Label::new("a", "red")),
            Err(TallyError::StorageNotReady)
        ));
        assert!(matches!(
            collection.get_all(),
            Err(TallyError::StorageNotReady)
        ));
        assert!(matches!(
            collection.delete(CategoryId::new(1)),
            Err(TallyError::StorageNotReady)
        ));
        assert!(matches!(
            collection.update(CategoryId::new(1), Label::new("a", "red")),
            Err(TallyError::StorageNotReady)
        ));
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_temp_dir, collection) = create_test_collection();

        let first = collection.add(Label::new("a", "red")).unwrap();
        let second = collection.add(Label::new("b", "red")).unwrap();

        assert_eq!(first, CategoryId::new(1));
        assert_eq!(second, CategoryId::new(2));
        assert_eq!(collection.get(first).unwrap().unwrap().id, first);
        assert_eq!(collection.count().unwrap(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete_and_reload() {
        let (temp_dir, collection) = create_test_collection();

        collection.add(Label::new("a", "red")).unwrap();
        let second = collection.add(Label::new("b", "red")).unwrap();
        assert!(collection.delete(second).unwrap());

        let reopened: Collection<Label> = Collection::new(temp_dir.path().join("labels.json"));
        reopened.load().unwrap();
        assert_eq!(reopened.count().unwrap(), 1);

        let third = reopened.add(Label::new("c", "blue")).unwrap();
        assert_eq!(third, CategoryId::new(3));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_temp_dir, collection) = create_test_collection();
        collection.add(Label::new("a", "red")).unwrap();

        assert!(!collection.delete(CategoryId::new(99)).unwrap());
        assert_eq!(collection.count().unwrap(), 1);
    }

    #[test]
    fn test_update_replaces_fields_and_keeps_id() {
        let (_temp_dir, collection) = create_test_collection();
        let id = collection.add(Label::new("a", "red")).unwrap();

        collection.update(id, Label::new("A2", "blue")).unwrap();

        let stored = collection.get(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.text, "A2");
        assert!(collection.find_by_index("colour", "red").unwrap().is_empty());
        assert_eq!(collection.find_by_index("colour", "blue").unwrap().len(), 1);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, collection) = create_test_collection();
        let result = collection.update(CategoryId::new(5), Label::new("a", "red"));
        assert!(matches!(result, Err(TallyError::NotFound { .. })));
        assert_eq!(collection.count().unwrap(), 0);
    }

    #[test]
    fn test_unique_index_rejects_duplicates() {
        let (_temp_dir, collection) = create_test_collection();
        let id = collection.add(Label::new("Food", "red")).unwrap();

        assert!(collection.add(Label::new("FOOD", "blue")).is_err());
        assert_eq!(collection.count().unwrap(), 1);

        // Updating a record to its own key is fine
        collection.update(id, Label::new("food", "green")).unwrap();

        let other = collection.add(Label::new("Rent", "red")).unwrap();
        assert!(collection.update(other, Label::new("Food", "red")).is_err());
        assert_eq!(collection.get(other).unwrap().unwrap().text, "Rent");
    }

    #[test]
    fn test_find_unique_and_indexes() {
        let (_temp_dir, collection) = create_test_collection();
        collection.add(Label::new("a", "red")).unwrap();
        let b = collection.add(Label::new("b", "red")).unwrap();

        assert_eq!(collection.count_by_index("colour", "red").unwrap(), 2);
        assert_eq!(collection.find_unique("text", "b").unwrap().unwrap().id, b);

        collection.delete(b).unwrap();
        assert_eq!(collection.count_by_index("colour", "red").unwrap(), 1);
        assert!(collection.find_unique("text", "b").unwrap().is_none());
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let collection: Collection<Label> = Collection::new(blocker.join("labels.json"));
        collection.load().unwrap();

        let result = collection.add(Label::new("a", "red"));
        assert!(matches!(result, Err(TallyError::Storage(_))));
        assert_eq!(collection.count().unwrap(), 0);
        assert!(collection.find_unique("text", "a").unwrap().is_none());
    }

    #[test]
    fn test_create_if_missing_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let collection: Collection<Label> = Collection::new(temp_dir.path().join("labels.json"));

        assert!(collection.create_if_missing().unwrap());
        assert!(!collection.create_if_missing().unwrap());
        collection.load().unwrap();
        assert_eq!(collection.count().unwrap(), 0);
        let id = collection.add(Label::new("a", "red")).unwrap();
        assert_eq!(id, CategoryId::new(1));
    }
}
