//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print
//! their results and return errors to `main` untouched.

pub mod category;
pub mod estimate;
pub mod history;
pub mod report;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use estimate::{handle_estimate_command, EstimateCommands};
pub use history::handle_history_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::error::{TallyError, TallyResult};
use crate::models::{Money, MonthPeriod};

/// Parse a user-entered amount ("12.50", "$12.50", "12")
pub(crate) fn parse_amount(input: &str) -> TallyResult<Money> {
    Money::parse(input).map_err(|e| TallyError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> TallyResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            TallyError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Parse a YYYY-MM month, defaulting to the current month
pub(crate) fn parse_month(input: Option<&str>) -> TallyResult<MonthPeriod> {
    match input {
        Some(s) => s
            .parse::<MonthPeriod>()
            .map_err(|e| TallyError::Validation(e.to_string())),
        None => Ok(MonthPeriod::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(matches!(parse_amount("twelve"), Err(TallyError::Validation(_))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("2024-02-30")).is_err());
        assert!(parse_date(None).is_ok());
    }

    #[test]
    fn test_parse_month() {
        let period = parse_month(Some("2024-03")).unwrap();
        assert_eq!((period.year(), period.month()), (2024, 3));
        assert!(matches!(
            parse_month(Some("2024-13")),
            Err(TallyError::Validation(_))
        ));
        assert_eq!(parse_month(None).unwrap(), MonthPeriod::current());
    }
}
