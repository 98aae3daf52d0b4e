//! Estimate service

use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{TallyError, TallyResult};
use crate::models::{Estimate, EstimateId, Money, MonthPeriod};
use crate::storage::Storage;

/// Service for monthly spending estimates
pub struct EstimateService<'a> {
    storage: &'a Storage,
}

/// Fields supplied when creating an estimate
#[derive(Debug, Clone)]
pub struct EstimateInput {
    pub category: String,
    pub amount: Money,
    /// 1-12
    pub month: u32,
    /// Four digits
    pub year: i32,
}

impl EstimateInput {
    pub fn for_period(category: impl Into<String>, amount: Money, period: MonthPeriod) -> Self {
        Self {
            category: category.into(),
            amount,
            month: period.month(),
            year: period.year(),
        }
    }
}

impl<'a> EstimateService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and store a new estimate
    pub fn add(&self, input: EstimateInput) -> TallyResult<Estimate> {
        let period = MonthPeriod::new(input.year, input.month).map_err(|e| {
            warn!(month = input.month, "invalid estimate month rejected");
            TallyError::Validation(format!("Invalid estimate month: {}", e))
        })?;

        let mut estimate = Estimate::new(input.category.trim(), input.amount, period);
        estimate.validate().map_err(|e| {
            warn!(error = %e, "invalid estimate rejected");
            TallyError::Validation(e.to_string())
        })?;

        estimate.id = self
            .storage
            .estimates
            .add(estimate.clone())
            .map_err(|e| e.context("Failed to add estimate"))?;

        self.storage.log_create(
            EntityType::Estimate,
            estimate.id.to_string(),
            Some(format!("{} {}", estimate.category, period)),
            &estimate,
        );
        debug!(id = %estimate.id, %period, "estimate added");

        Ok(estimate)
    }

    pub fn get(&self, id: EstimateId) -> TallyResult<Option<Estimate>> {
        self.storage.estimates.get(id)
    }

    /// Every estimate, in id order
    pub fn list(&self) -> TallyResult<Vec<Estimate>> {
        self.storage.estimates.get_all()
    }

    /// Estimates covering one month
    pub fn list_for_month(&self, period: MonthPeriod) -> TallyResult<Vec<Estimate>> {
        self.storage.estimates.find_by_period(period)
    }

    /// Delete an estimate; deleting a missing id does nothing
    pub fn delete(&self, id: EstimateId) -> TallyResult<bool> {
        let Some(estimate) = self.storage.estimates.get(id)? else {
            debug!(%id, "delete of missing estimate ignored");
            return Ok(false);
        };

        let removed = self
            .storage
            .estimates
            .delete(id)
            .map_err(|e| e.context("Failed to delete estimate"))?;

        if removed {
            self.storage.log_delete(
                EntityType::Estimate,
                id.to_string(),
                Some(estimate.category.clone()),
                &estimate,
            );
            debug!(%id, "estimate deleted");
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TallyPaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn input(category: &str, units: i64, month: u32, year: i32) -> EstimateInput {
        EstimateInput {
            category: category.into(),
            amount: Money::from_units(units),
            month,
            year,
        }
    }

    #[test]
    fn test_add_derives_date() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EstimateService::new(&storage);

        let estimate = service.add(input("food", 300, 1, 2024)).unwrap();
        assert_eq!(estimate.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let listed = service.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, estimate.id);
    }

    #[test]
    fn test_add_validation() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EstimateService::new(&storage);

        for bad in [
            input("food", 300, 13, 2024),
            input("food", 300, 0, 2024),
            input("food", 300, 1, 24),
            input(" ", 300, 1, 2024),
        ] {
            assert!(matches!(service.add(bad), Err(TallyError::Validation(_))));
        }

        let mut negative = input("food", 0, 1, 2024);
        negative.amount = Money::from_cents(-100);
        assert!(matches!(service.add(negative), Err(TallyError::Validation(_))));

        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_for_month() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EstimateService::new(&storage);
        service.add(input("food", 300, 1, 2024)).unwrap();
        service.add(input("rent", 900, 1, 2024)).unwrap();
        service.add(input("food", 320, 2, 2024)).unwrap();

        let january = service
            .list_for_month(MonthPeriod::new(2024, 1).unwrap())
            .unwrap();
        assert_eq!(january.len(), 2);
    }

    #[test]
    fn test_delete_twice() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EstimateService::new(&storage);
        let estimate = service.add(input("food", 300, 1, 2024)).unwrap();

        assert!(service.delete(estimate.id).unwrap());
        assert!(!service.delete(estimate.id).unwrap());
        assert!(service.get(estimate.id).unwrap().is_none());
    }

    #[test]
    fn test_for_period_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EstimateService::new(&storage);
        let period = MonthPeriod::new(2025, 7).unwrap();

        let estimate = service
            .add(EstimateInput::for_period("Leisure", Money::from_units(40), period))
            .unwrap();
        assert!(estimate.is_for(period));
    }
}
