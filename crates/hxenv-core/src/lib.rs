pub mod config;
pub mod toolchain;

pub use config::ToolchainConfig;
pub use toolchain::{Toolchain, resolve_packages};

use hxenv_error::Result;
use hxenv_runtime::{CommandSpec, ShellDialect};

/// Installs the configured toolchain into its install root.
pub fn install(config: &ToolchainConfig) -> Result<()> {
    let mut toolchain = Toolchain::new(config)?;
    toolchain.install()
}

/// Installs (if needed) and runs the commands inside the composed
/// environment.
pub fn run(config: &ToolchainConfig, commands: Vec<CommandSpec>) -> Result<()> {
    let mut toolchain = Toolchain::new(config)?;
    toolchain.run(commands)
}

/// Installs (if needed) and renders the composed environment plus pending
/// commands as an export script.
pub fn export_script(
    config: &ToolchainConfig,
    commands: Vec<CommandSpec>,
    dialect: ShellDialect,
) -> Result<String> {
    let mut toolchain = Toolchain::new(config)?;
    toolchain.export_script(commands, dialect)
}
