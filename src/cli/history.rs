//! Change history command

use crate::error::TallyResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(storage: &Storage, limit: usize) -> TallyResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled. Enable it with 'tally config audit_log on'.");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
