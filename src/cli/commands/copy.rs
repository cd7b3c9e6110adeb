//! `passvault copy` — put a record's password on the clipboard.

use crate::cli::output;
use crate::cli::{log_audit, open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `copy` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let session = open_session(cli)?;

    let record_id = session.resolve(id)?;
    let record = session
        .record(record_id)
        .ok_or_else(|| PassVaultError::RecordNotFound(id.to_string()))?;

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(record.password.clone())
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard write failed: {e}")))?;

    log_audit(session.path(), "copy", Some(&record_id.short()), None);
    output::success(&format!("Password for '{}' copied to clipboard", record.service));

    Ok(())
}
