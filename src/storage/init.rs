//! Storage initialization
//!
//! Creates the data directory and collection files on first run, loads every
//! collection, and seeds the default categories into an empty category
//! collection. Running it again is harmless.

use tracing::info;

use crate::error::TallyResult;
use crate::models::Category;

use super::categories::seed_defaults;
use super::Storage;

/// What an initialization run did
#[derive(Debug, Clone, Default)]
pub struct Initialization {
    /// Whether any collection file had to be created
    pub fresh: bool,
    /// Default categories inserted because the collection was empty
    pub seeded_categories: Vec<Category>,
}

/// Prepare storage for use
pub fn initialize_storage(storage: &Storage) -> TallyResult<Initialization> {
    let paths = storage.paths();
    paths.ensure_directories()?;

    let mut fresh = false;
    fresh |= storage.transactions.create_if_missing()?;
    fresh |= storage.estimates.create_if_missing()?;
    fresh |= storage.categories.create_if_missing()?;

    storage.transactions.load()?;
    storage.estimates.load()?;
    storage.categories.load()?;

    let seeded_categories = if storage.categories.count()? == 0 {
        seed_defaults(&storage.categories)?
    } else {
        Vec::new()
    };

    info!(
        base_dir = %paths.base_dir().display(),
        fresh,
        seeded = seeded_categories.len(),
        "storage initialized"
    );

    Ok(Initialization {
        fresh,
        seeded_categories,
    })
}
