use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.  Key derivation costs are not
/// configurable: the vault file does not record them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file, relative to the directory holding the config.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Length of generated passwords (default: 16).
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Whether generated passwords include symbols (default: true).
    #[serde(default = "default_generator_symbols")]
    pub generator_symbols: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.bin".to_string()
}

fn default_generator_length() -> usize {
    16
}

fn default_generator_symbols() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            generator_length: default_generator_length(),
            generator_symbols: default_generator_symbols(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.generator_length == 0 {
            return Err(PassVaultError::ConfigError(format!(
                "{}: generator_length must be at least 1",
                config_path.display()
            )));
        }

        Ok(settings)
    }

    /// Full path to the vault file.
    ///
    /// Example: `project_dir/vault.bin`
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_file, "vault.bin");
        assert_eq!(s.generator_length, 16);
        assert!(s.generator_symbols);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "vault.bin");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_file = "secrets/personal.bin"
generator_length = 24
generator_symbols = false
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "secrets/personal.bin");
        assert_eq!(settings.generator_length, 24);
        assert!(!settings.generator_symbols);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "generator_length = 32\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.generator_length, 32);
        assert_eq!(settings.vault_file, "vault.bin");
        assert!(settings.generator_symbols);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PassVaultError::ConfigError(_))));
    }

    #[test]
    fn load_rejects_zero_generator_length() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "generator_length = 0\n").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn vault_path_joins_project_dir() {
        let s = Settings::default();
        let project = Path::new("/home/user/passwords");
        assert_eq!(
            s.vault_path(project),
            PathBuf::from("/home/user/passwords/vault.bin")
        );
    }
}
