//! `passvault init` — create a new, empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{log_audit, prompt_new_password, vault_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;

    // 1. Refuse to overwrite an existing vault.
    if path.exists() {
        output::tip("Use `passvault add` to add records to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // 2. Create the parent directory if needed.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            output::info(&format!("Created directory: {}", parent.display()));
        }
    }

    // 3. Prompt for the master password and write the empty vault.
    let password = prompt_new_password()?;
    let session = VaultSession::create(&path, password.as_bytes())?;

    log_audit(session.path(), "init", None, Some("vault created"));

    output::success(&format!("Vault created at {}", path.display()));
    output::warning("There is no way to recover the vault without the master password.");
    output::tip("Run `passvault add <SERVICE> <LOGIN>` to add a record.");
    output::tip("Run `passvault list` to see all records.");

    Ok(())
}
