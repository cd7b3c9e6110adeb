//! `passvault edit` — change fields of an existing record.

use crate::cli::commands::add::prompt_record_password;
use crate::cli::output;
use crate::cli::{load_settings, log_audit, open_session, Cli, GeneratorArgs};
use crate::crypto::generate_secret;
use crate::errors::{PassVaultError, Result};
use crate::vault::RecordUpdate;

/// Field changes requested on the command line.
pub struct EditArgs<'a> {
    pub service: Option<&'a str>,
    pub login: Option<&'a str>,
    pub group: Option<&'a str>,
    pub password: bool,
    pub generate: bool,
    pub generator: &'a GeneratorArgs,
}

/// Execute the `edit` command.
pub fn execute(cli: &Cli, id: &str, args: &EditArgs<'_>) -> Result<()> {
    let mut session = open_session(cli)?;
    let record_id = session.resolve(id)?;
    let service = session
        .record(record_id)
        .map(|r| r.service.clone())
        .ok_or_else(|| PassVaultError::RecordNotFound(id.to_string()))?;

    let new_password = if args.generate {
        let (length, symbols) = args.generator.resolve(&load_settings()?);
        Some(generate_secret(length, symbols)?)
    } else if args.password {
        Some(prompt_record_password(&service)?)
    } else {
        None
    };

    let update = RecordUpdate {
        service: args.service.map(str::to_string),
        login: args.login.map(str::to_string),
        password: new_password.as_ref().map(|p| p.as_str().to_string()),
        group: args.group.map(str::to_string),
    };

    if update.is_empty() {
        output::info("Nothing to change.");
        output::tip("Pass --service, --login, --group, --password or --generate.");
        return Ok(());
    }

    session.update_record(record_id, update)?;

    log_audit(session.path(), "edit", Some(&record_id.short()), None);
    output::success(&format!("Updated record {}", record_id.short()));

    Ok(())
}
