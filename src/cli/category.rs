//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::{TallyError, TallyResult};
use crate::models::CategoryKind;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// "expense" or "income"
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: CategoryKind,
    },

    /// List categories (restores the defaults if there are none)
    List {
        /// Only "expense" or "income"
        #[arg(short = 't', long = "type")]
        kind: Option<CategoryKind>,
    },

    /// Rename a category or change its type
    Edit {
        /// Category name or ID
        category: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short = 't', long = "type")]
        kind: Option<CategoryKind>,
    },

    /// Delete a category nothing refers to
    Delete {
        /// Category name or ID
        category: String,
    },

    /// Re-create any missing default categories
    Restore,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TallyResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add { name, kind } => {
            let category = service.add(&name, kind)?;
            println!("Created {} category: {}", category.kind, category.name);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::List { kind } => {
            let categories = service.list(kind)?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Edit {
            category,
            name,
            kind,
        } => {
            let current = service
                .find(&category)?
                .ok_or_else(|| TallyError::category_not_found(&category))?;

            if name.is_none() && kind.is_none() {
                println!("No changes specified. Use --name or --type.");
                return Ok(());
            }

            let updated = service.update(
                current.id,
                name.as_deref().unwrap_or(&current.name),
                kind.unwrap_or(current.kind),
            )?;
            println!("Updated category: {} ({})", updated.name, updated.kind);
        }

        CategoryCommands::Delete { category } => {
            let current = service
                .find(&category)?
                .ok_or_else(|| TallyError::category_not_found(&category))?;

            let deleted = service.delete(current.id)?;
            println!("Deleted category: {}", deleted.name);
        }

        CategoryCommands::Restore => {
            let restored = service.restore_defaults()?;
            if restored.is_empty() {
                println!("All default categories are already present.");
            } else {
                let names: Vec<&str> = restored.iter().map(|c| c.name.as_str()).collect();
                println!("Restored: {}", names.join(", "));
            }
        }
    }

    Ok(())
}
