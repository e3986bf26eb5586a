//! Category CLI commands

use clap::Subcommand;

use crate::error::TallyResult;
use crate::state::AppState;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List known categories
    List {
        /// Only show categories starting with this text
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Add a category to the registry
    Add {
        /// Category name
        name: String,
    },

    /// Rebuild the registry from the saved list and the ledger
    Rebuild,
}

/// Handle a category command
pub fn handle_category_command(state: &mut AppState, cmd: CategoryCommands) -> TallyResult<()> {
    match cmd {
        CategoryCommands::List { prefix } => {
            let names = state.categories().suggest(prefix.as_deref().unwrap_or(""));
            if names.is_empty() {
                println!("No categories found.");
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }

        CategoryCommands::Add { name } => {
            if state.add_category(&name)? {
                println!("Added category: {}", name.trim());
            } else {
                println!("Category already exists or is blank: {}", name.trim());
            }
        }

        CategoryCommands::Rebuild => {
            state.rebuild_categories()?;
            println!("Category list rebuilt ({} categories)", state.categories().len());
        }
    }

    Ok(())
}
