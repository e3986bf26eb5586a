//! Reports module for Tally
//!
//! Pure aggregations over a ledger snapshot: summary totals, the monthly
//! series, the category breakdown, the budget note and the filtered register.

pub mod budget;
pub mod category;
pub mod monthly;
pub mod register;
pub mod summary;

pub use budget::BudgetNote;
pub use category::CategoryBreakdown;
pub use monthly::MonthlySeries;
pub use register::{filter_register, RegisterFilter};
pub use summary::Summary;
