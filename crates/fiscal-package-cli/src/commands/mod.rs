//! CLI command implementations.

pub mod concepts;
pub mod currency;
pub mod infer;
pub mod name;
pub mod validate;

use fiscal_package::{FiscalConfig, FiscalPackager};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Packager configured from the environment, with per-command overrides applied.
pub(crate) fn packager(configure: impl FnOnce(&mut FiscalConfig)) -> Result<FiscalPackager, Box<dyn std::error::Error>> {
    let mut config = FiscalConfig::from_env()?;
    configure(&mut config);
    Ok(FiscalPackager::with_config(config)?)
}
