//! `passvault generate` — print a random password.  Needs no vault.

use crate::cli::{load_settings, GeneratorArgs};
use crate::crypto::generate_secret;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(generator: &GeneratorArgs) -> Result<()> {
    let (length, symbols) = generator.resolve(&load_settings()?);
    let password = generate_secret(length, symbols)?;
    println!("{}", password.as_str());
    Ok(())
}
