//! `passvault list` — display active or trashed records in a table.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, trash: bool) -> Result<()> {
    let session = open_session(cli)?;

    let records = if trash {
        session.list_trash()
    } else {
        session.list_active()
    };

    let view = if trash { "trash" } else { "vault" };
    output::info(&format!("{} record(s) in {view}", records.len()));

    output::print_records_table(&records, trash);

    Ok(())
}
