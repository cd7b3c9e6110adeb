//! `passvault purge` — permanently empty the trash.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{log_audit, open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `purge` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let mut session = open_session(cli)?;

    let pending = session.list_trash().len();
    if pending == 0 {
        output::info("The trash is already empty.");
        return Ok(());
    }

    // Unless --force is set, ask for confirmation: this cannot be undone.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete {pending} record(s) from the trash? This cannot be undone"
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = session.purge_trash()?;

    log_audit(
        session.path(),
        "purge",
        None,
        Some(&format!("{removed} record(s)")),
    );
    output::success(&format!("Purged {removed} record(s)"));

    Ok(())
}
