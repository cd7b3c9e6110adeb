//! `passvault show` — print one record.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, reveal: bool) -> Result<()> {
    let session = open_session(cli)?;

    let record_id = session.resolve(id)?;
    let record = session
        .record(record_id)
        .ok_or_else(|| PassVaultError::RecordNotFound(id.to_string()))?;

    if reveal {
        output::warning("Password shown in clear text.");
    }
    output::print_record_detail(record, reveal);

    Ok(())
}
