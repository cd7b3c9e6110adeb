//! `passvault add` — store a new credential.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_settings, log_audit, open_session, Cli, GeneratorArgs};
use crate::crypto::generate_secret;
use crate::errors::{PassVaultError, Result};
use crate::vault::NewRecord;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    login: &str,
    group: Option<&str>,
    generate: bool,
    generator: &GeneratorArgs,
) -> Result<()> {
    let mut session = open_session(cli)?;

    // Either generate the password or ask for it.
    let password = if generate {
        let (length, symbols) = generator.resolve(&load_settings()?);
        generate_secret(length, symbols)?
    } else {
        prompt_record_password(service)?
    };

    let record = NewRecord::new(service, login, password.as_str())
        .with_group(group.unwrap_or_default());
    let id = session.add_record(record)?;

    log_audit(session.path(), "add", Some(&id.short()), None);

    output::success(&format!(
        "Added '{service}' ({}, {} active)",
        id.short(),
        session.list_active().len()
    ));
    if generate {
        output::tip(&format!("Run `passvault copy {}` to copy the password.", id.short()));
    }

    Ok(())
}

/// Hidden prompt with confirmation for a record's password.
pub(crate) fn prompt_record_password(service: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(format!("Password for {service}"))
        .with_confirmation("Repeat password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}
