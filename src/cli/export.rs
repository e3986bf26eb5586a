//! CLI command for CSV export

use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::state::AppState;

/// Write the ledger as CSV to `output`, or to stdout when `None`
pub fn handle_export_command(state: &AppState, output: Option<&Path>) -> TallyResult<()> {
    let csv = state.export_csv();

    match output {
        Some(path) => {
            std::fs::write(path, &csv).map_err(|e| {
                TallyError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            eprintln!(
                "Exported {} transactions to {}",
                state.transactions().len(),
                path.display()
            );
        }
        None => println!("{}", csv),
    }

    Ok(())
}
