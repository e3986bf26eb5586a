//! Service layer for Tally
//!
//! Pure operations over ledger snapshots: import normalization, merging and
//! editing, and the category registry. None of these touch storage.

pub mod category;
pub mod import;
pub mod ledger;

pub use category::CategoryRegistry;
pub use import::{import_csv, normalize_rows, ImportOutcome};
pub use ledger::{merge, MergeMode};
