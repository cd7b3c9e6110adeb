//! `passvault restore` — bring a record back from the trash.

use crate::cli::output;
use crate::cli::{log_audit, open_session, Cli};
use crate::errors::Result;

/// Execute the `restore` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let mut session = open_session(cli)?;

    let record_id = session.resolve(id)?;
    session.restore_record(record_id)?;

    log_audit(session.path(), "restore", Some(&record_id.short()), None);
    output::success(&format!("Restored {}", record_id.short()));

    Ok(())
}
