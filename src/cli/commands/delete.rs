//! `passvault delete` — move a record to the trash.

use crate::cli::output;
use crate::cli::{log_audit, open_session, Cli};
use crate::errors::Result;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let mut session = open_session(cli)?;

    let record_id = session.resolve(id)?;
    session.soft_delete_record(record_id)?;

    log_audit(session.path(), "delete", Some(&record_id.short()), None);
    output::success(&format!("Moved {} to the trash", record_id.short()));
    output::tip(&format!(
        "Run `passvault restore {}` to bring it back.",
        record_id.short()
    ));

    Ok(())
}
