//! Config command implementation.

use anyhow::Context;
use datagent_core::Config;

/// Print the effective configuration.
pub fn execute(config: &Config) -> anyhow::Result<()> {
    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
