//! Monthly spending estimate model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EstimateId;
use super::money::Money;
use super::period::MonthPeriod;

/// The amount a user expects to spend in a category during one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Identifier assigned by the store
    #[serde(default)]
    pub id: EstimateId,

    /// Category name
    pub category: String,

    /// Expected amount
    pub amount: Money,

    /// Month, 1-12
    pub month: u32,

    /// Four-digit year
    pub year: i32,

    /// First day of `month`/`year`
    pub date: NaiveDate,

    /// When the estimate was created
    pub created_at: DateTime<Utc>,
}

impl Estimate {
    /// Create a new estimate for a month
    pub fn new(category: impl Into<String>, amount: Money, period: MonthPeriod) -> Self {
        Self {
            id: EstimateId::UNASSIGNED,
            category: category.into(),
            amount,
            month: period.month(),
            year: period.year(),
            date: period.first_day(),
            created_at: Utc::now(),
        }
    }

    /// The month this estimate covers
    pub fn period(&self) -> Result<MonthPeriod, EstimateValidationError> {
        MonthPeriod::new(self.year, self.month)
            .map_err(|_| EstimateValidationError::InvalidMonth(self.month))
    }

    /// Whether the estimate covers the given month
    pub fn is_for(&self, period: MonthPeriod) -> bool {
        self.year == period.year() && self.month == period.month()
    }

    /// Validate the estimate
    pub fn validate(&self) -> Result<(), EstimateValidationError> {
        if self.category.trim().is_empty() {
            return Err(EstimateValidationError::MissingCategory);
        }

        if self.amount.is_negative() {
            return Err(EstimateValidationError::NegativeAmount(self.amount));
        }

        let period = self.period()?;

        if !(1000..=9999).contains(&self.year) {
            return Err(EstimateValidationError::InvalidYear(self.year));
        }

        if self.date != period.first_day() {
            return Err(EstimateValidationError::DateMismatch(self.date));
        }

        Ok(())
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02} {} {}",
            self.year, self.month, self.category, self.amount
        )
    }
}

/// Validation errors for estimates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateValidationError {
    MissingCategory,
    NegativeAmount(Money),
    InvalidMonth(u32),
    InvalidYear(i32),
    DateMismatch(NaiveDate),
}

impl fmt::Display for EstimateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Estimate category is required"),
            Self::NegativeAmount(amount) => {
                write!(f, "Estimate amount cannot be negative ({})", amount)
            }
            Self::InvalidMonth(month) => {
                write!(f, "Estimate month must be between 1 and 12, got {}", month)
            }
            Self::InvalidYear(year) => {
                write!(f, "Estimate year must have four digits, got {}", year)
            }
            Self::DateMismatch(date) => {
                write!(f, "Estimate date {} is not the first day of its month", date)
            }
        }
    }
}

impl std::error::Error for EstimateValidationError {}
