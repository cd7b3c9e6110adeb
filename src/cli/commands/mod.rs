//! One module per `passvault` subcommand.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod purge;
pub mod restore;
pub mod show;
