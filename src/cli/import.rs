//! CLI command handler for CSV import

use std::path::Path;

use crate::error::{TallyError, TallyResult};
use crate::services::MergeMode;
use crate::state::AppState;

/// Handle the import command
///
/// `mode` falls back to the configured default import mode.
pub fn handle_import_command(
    state: &mut AppState,
    file: &Path,
    mode: Option<MergeMode>,
) -> TallyResult<()> {
    if !file.exists() {
        return Err(TallyError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let content = std::fs::read_to_string(file)
        .map_err(|e| TallyError::Import(format!("Failed to read file: {}", e)))?;

    let mode = mode.unwrap_or(state.settings().default_import_mode);
    let outcome = state.import_csv(&content, mode)?;

    println!("Import from '{}' ({} mode)", file.display(), outcome.mode);
    println!("{}", "=".repeat(40));
    println!("  Rows read:      {}", outcome.rows_read);
    println!("  Imported:       {}", outcome.imported());
    println!("  Dropped:        {}", outcome.dropped());
    println!("  Ledger size:    {}", outcome.ledger.len());

    if outcome.imported() == 0 {
        println!();
        println!("No valid rows were imported.");
    }

    Ok(())
}
