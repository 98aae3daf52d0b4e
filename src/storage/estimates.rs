//! Estimate repository
//!
//! Stores estimates in estimates.json, indexed by month and category name.

use std::path::PathBuf;

use crate::error::TallyResult;
use crate::models::{Estimate, EstimateId, MonthPeriod};

use super::collection::{Collection, Record};

pub(crate) const BY_MONTH: &str = "month";
pub(crate) const BY_CATEGORY: &str = "category";

impl Record for Estimate {
    type Id = EstimateId;
    const ENTITY: &'static str = "Estimate";

    fn id(&self) -> EstimateId {
        self.id
    }

    fn assign_id(&mut self, id: EstimateId) {
        self.id = id;
    }

    fn index_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (BY_MONTH, self.month.to_string()),
            (BY_CATEGORY, self.category.clone()),
        ]
    }
}

/// Repository for estimate persistence with indexing
pub struct EstimateRepository {
    records: Collection<Estimate>,
}

impl EstimateRepository {
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

    pub fn add(&self, estimate: Estimate) -> TallyResult<EstimateId> {
        self.records.add(estimate)
    }

    pub fn get(&self, id: EstimateId) -> TallyResult<Option<Estimate>> {
        self.records.get(id)
    }

    pub fn get_all(&self) -> TallyResult<Vec<Estimate>> {
        self.records.get_all()
    }

    /// Delete an estimate; returns whether it existed
    pub fn delete(&self, id: EstimateId) -> TallyResult<bool> {
        self.records.delete(id)
    }

    /// Estimates covering one month
    ///
    /// Narrows by the month index, then keeps the matching year.
    pub fn find_by_period(&self, period: MonthPeriod) -> TallyResult<Vec<Estimate>> {
        let mut estimates = self
            .records
            .find_by_index(BY_MONTH, &period.month().to_string())?;
        estimates.retain(|e| e.year == period.year());
        Ok(estimates)
    }

    pub fn count_by_category(&self, category: &str) -> TallyResult<usize> {
        self.records.count_by_index(BY_CATEGORY, category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EstimateRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EstimateRepository::new(temp_dir.path().join("estimates.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn period(year: i32, month: u32) -> MonthPeriod {
        MonthPeriod::new(year, month).unwrap()
    }

    #[test]
    fn test_find_by_period() {
        let (_temp_dir, repo) = create_test_repo();
        repo.add(Estimate::new("food", Money::from_units(300), period(2024, 1)))
            .unwrap();
        repo.add(Estimate::new("food", Money::from_units(280), period(2025, 1)))
            .unwrap();
        repo.add(Estimate::new("rent", Money::from_units(900), period(2024, 2)))
            .unwrap();

        let jan_2024 = repo.find_by_period(period(2024, 1)).unwrap();
        assert_eq!(jan_2024.len(), 1);
        assert_eq!(jan_2024[0].amount, Money::from_units(300));

        assert_eq!(repo.count_by_category("food").unwrap(), 2);
        assert!(repo.find_by_period(period(2024, 3)).unwrap().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_temp_dir, repo) = create_test_repo();
        let id = repo
            .add(Estimate::new("food", Money::from_units(300), period(2024, 1)))
            .unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_persistence_keeps_derived_date() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estimates.json");
        {
            let repo = EstimateRepository::new(path.clone());
            repo.load().unwrap();
            repo.add(Estimate::new("food", Money::from_units(300), period(2024, 6)))
                .unwrap();
        }

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("2024-06-01"));

        let repo = EstimateRepository::new(path);
        repo.load().unwrap();
        let all = repo.get_all().unwrap();
        assert_eq!(all[0].date, period(2024, 6).first_day());
    }
}
