//! Display formatting for terminal output

pub mod category;
pub mod estimate;
pub mod transaction;

pub use category::format_category_list;
pub use estimate::format_estimate_list;
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
