//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Record;

/// Fixed-width mask so hidden passwords don't leak their length.
const MASK: &str = "********";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of records (Id, Group, Service, Login).  Passwords are
/// never part of the table.
pub fn print_records_table(records: &[&Record], trash: bool) {
    if records.is_empty() {
        if trash {
            info("The trash is empty.");
        } else {
            info("No records in this vault yet.");
            tip("Run `passvault add <SERVICE> <LOGIN>` to add your first record.");
        }
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Group", "Service", "Login", "Updated"]);

    for r in records {
        table.add_row(vec![
            r.id.short(),
            group_label(&r.group),
            r.service.clone(),
            r.login.clone(),
            r.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print every field of one record.  The password is masked unless
/// `reveal` is set.
pub fn print_record_detail(record: &Record, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let password = if reveal {
        record.password.clone()
    } else {
        MASK.to_string()
    };

    table.add_row(vec!["Id".to_string(), record.id.to_string()]);
    table.add_row(vec!["Service".to_string(), record.service.clone()]);
    table.add_row(vec!["Login".to_string(), record.login.clone()]);
    table.add_row(vec!["Password".to_string(), password]);
    table.add_row(vec!["Group".to_string(), group_label(&record.group)]);
    if record.deleted {
        table.add_row(vec!["Status".to_string(), "in trash".to_string()]);
    }
    table.add_row(vec![
        "Created".to_string(),
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    table.add_row(vec![
        "Updated".to_string(),
        record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);

    println!("{table}");
}

fn group_label(group: &str) -> String {
    if group.is_empty() {
        "-".to_string()
    } else {
        group.to_string()
    }
}
