//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(name = "passvault", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: `vault_file` from .passvault.toml, or vault.bin)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault
    Init,

    /// List stored credentials (passwords hidden)
    List {
        /// Show the trash instead of active records
        #[arg(long)]
        trash: bool,
    },

    /// Add a credential
    Add {
        /// Service or site name (e.g. github)
        service: String,
        /// Login or user name
        login: String,
        /// Group to file the record under
        #[arg(short, long)]
        group: Option<String>,
        /// Generate a random password instead of prompting
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Show one credential
    Show {
        /// Record id (a unique prefix is enough)
        id: String,
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Copy a credential's password to the clipboard
    Copy {
        /// Record id (a unique prefix is enough)
        id: String,
    },

    /// Change fields of a credential
    Edit {
        /// Record id (a unique prefix is enough)
        id: String,
        /// New service name
        #[arg(long)]
        service: Option<String>,
        /// New login
        #[arg(long)]
        login: Option<String>,
        /// New group (empty string removes the group)
        #[arg(long)]
        group: Option<String>,
        /// Prompt for a new password
        #[arg(long, conflicts_with = "generate")]
        password: bool,
        /// Replace the password with a generated one
        #[arg(long)]
        generate: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Move a credential to the trash
    Delete {
        /// Record id (a unique prefix is enough)
        id: String,
    },

    /// Move a credential back from the trash
    Restore {
        /// Record id (a unique prefix is enough)
        id: String,
    },

    /// Permanently empty the trash
    Purge {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print a random password
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Password generator options shared by `add`, `edit` and `generate`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Length of the generated password
    #[arg(long)]
    pub length: Option<usize>,

    /// Include symbols in the generated password
    #[arg(long, conflicts_with = "no_symbols")]
    pub symbols: bool,

    /// Letters and digits only
    #[arg(long)]
    pub no_symbols: bool,
}

impl GeneratorArgs {
    /// Combine the flags with the configured defaults.
    pub fn resolve(&self, settings: &Settings) -> (usize, bool) {
        let length = self.length.unwrap_or(settings.generator_length);
        let symbols = if self.symbols {
            true
        } else if self.no_symbols {
            false
        } else {
            settings.generator_symbols
        };
        (length, symbols)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.passvault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the full path to the vault file from the CLI arguments.
///
/// `--vault` wins over the config file.
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.vault {
        Some(v) => Ok(cwd.join(v)),
        None => Ok(Settings::load(&cwd)?.vault_path(&cwd)),
    }
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripting/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD`.  Any non-empty password is accepted.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let password = dialoguer::Password::new()
        .with_prompt("Choose master password")
        .with_confirmation(
            "Confirm master password",
            "Passwords do not match, try again",
        )
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;

    if password.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "master password cannot be empty".into(),
        ));
    }

    Ok(Zeroizing::new(password))
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Resolve the vault path, prompt for the password and unlock the vault.
pub fn open_session(cli: &Cli) -> Result<VaultSession> {
    let path = vault_path(cli)?;
    if !path.exists() {
        output::tip("Run `passvault init` to create a vault.");
        return Err(PassVaultError::NotFound(path));
    }

    let password = prompt_password()?;
    VaultSession::open(&path, password.as_bytes())
}

/// Record an operation in the audit log, if the feature is compiled in.
pub fn log_audit(vault: &Path, op: &str, record_id: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(vault, op, record_id, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (vault, op, record_id, details);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_args_fall_back_to_settings() {
        let settings = Settings {
            generator_length: 20,
            generator_symbols: false,
            ..Settings::default()
        };
        assert_eq!(GeneratorArgs::default().resolve(&settings), (20, false));
    }

    #[test]
    fn generator_flags_override_settings() {
        let settings = Settings::default();
        let args = GeneratorArgs {
            length: Some(40),
            symbols: false,
            no_symbols: true,
        };
        assert_eq!(args.resolve(&settings), (40, false));

        let args = GeneratorArgs {
            symbols: true,
            ..GeneratorArgs::default()
        };
        let settings = Settings {
            generator_symbols: false,
            ..Settings::default()
        };
        assert_eq!(args.resolve(&settings), (16, true));
    }

    #[test]
    fn cli_parses_add_with_group() {
        let cli = Cli::try_parse_from([
            "passvault", "add", "github", "alice", "--group", "work", "--generate",
        ])
        .unwrap();
        match cli.command {
            Commands::Add {
                service,
                login,
                group,
                generate,
                ..
            } => {
                assert_eq!(service, "github");
                assert_eq!(login, "alice");
                assert_eq!(group.as_deref(), Some("work"));
                assert!(generate);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn cli_rejects_conflicting_symbol_flags() {
        let result = Cli::try_parse_from(["passvault", "generate", "--symbols", "--no-symbols"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_vault_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["passvault", "list", "--vault", "other.bin"]).unwrap();
        assert_eq!(cli.vault.as_deref(), Some("other.bin"));
    }
}
