use std::fs;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, ValueEnum};

use hxenv_catalog::Platform;
use hxenv_constants::{
    DEFAULT_HAXE_VERSION, DEFAULT_INSTALL_DIR, DEFAULT_NEKO_VERSION, DESCRIPTION, EXAMPLES,
    REPOSITORY_URL,
};
use hxenv_core::{Toolchain, ToolchainConfig};
use hxenv_runtime::{CommandSpec, ShellDialect};

#[derive(Parser)]
#[command(name = "hxenv")]
#[command(version)]
#[command(about = DESCRIPTION, long_about = None)]
#[command(after_help = examples_help())]
pub struct Cli {
    /// Command to run inside the provisioned environment
    #[arg(last = true, value_name = "CMD")]
    pub command: Vec<String>,

    /// Haxe version (x.x.x or latest)
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_HAXE_VERSION)]
    pub haxe_version: String,

    /// Neko version (x.x.x, or auto to pair one with the compiler)
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_NEKO_VERSION)]
    pub neko_version: String,

    /// Also install a VS Code build (x.y.z, stable or insider)
    #[arg(long, value_name = "VERSION")]
    pub vscode_version: Option<String>,

    /// Target platform (win, osx or linux), 64-bit only
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,

    /// Install the toolchain without running anything
    #[arg(short = 'i', long)]
    pub install: bool,

    /// Directory caching downloaded archives and unpacked packages
    #[arg(long, value_name = "DIR", default_value = DEFAULT_INSTALL_DIR)]
    pub install_path: PathBuf,

    /// Write the composed environment as an export script (- for stdout)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Export script dialect (defaults to the platform's shell)
    #[arg(long, value_enum, value_name = "DIALECT")]
    pub shell: Option<ShellKind>,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShellKind {
    Sh,
    Cmd,
    Plain,
}

impl From<ShellKind> for ShellDialect {
    fn from(kind: ShellKind) -> Self {
        match kind {
            ShellKind::Sh => Self::Sh,
            ShellKind::Cmd => Self::Cmd,
            ShellKind::Plain => Self::Plain,
        }
    }
}

fn examples_help() -> String {
    let mut help = String::from("Examples:\n");
    for (invocation, explanation) in EXAMPLES {
        help.push_str(&format!("  {invocation}\n      {explanation}\n"));
    }
    help.push_str(&format!("\nFor more information, visit <{REPOSITORY_URL}>"));
    help
}

fn default_dialect(platform: Platform) -> ShellDialect {
    match platform {
        Platform::Win => ShellDialect::Cmd,
        Platform::Osx | Platform::Linux => ShellDialect::Sh,
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<ToolchainConfig> {
    let platform = match &cli.platform {
        Some(name) => Platform::parse(name).ok_or_else(|| {
            anyhow::anyhow!("unsupported platform '{name}' (expected win, osx or linux)")
        })?,
        None => Platform::host(),
    };

    Ok(ToolchainConfig {
        haxe_version: cli.haxe_version.clone(),
        neko_version: cli.neko_version.clone(),
        vscode_version: cli.vscode_version.clone(),
        platform,
        install_root: cli.install_path.clone(),
        debug: cli.verbose,
    })
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    hxenv_logger::init(!cli.verbose);

    if !cli.install && cli.export.is_none() && cli.command.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = build_config(&cli)?;
    let mut toolchain = Toolchain::new(&config)?;

    if cli.install {
        toolchain.install()?;
    }

    if let Some(target) = &cli.export {
        let dialect = cli
            .shell
            .map_or_else(|| default_dialect(config.platform), Into::into);
        let commands = pending_commands(&cli);
        let script = toolchain.export_script(commands, dialect)?;
        if target == Path::new("-") {
            print!("{script}");
        } else {
            fs::write(target, &script)?;
            hxenv_logger::success(&format!("Environment written to {}", target.display()));
        }
    }

    if !cli.command.is_empty() {
        toolchain.run(pending_commands(&cli))?;
    }

    Ok(())
}

fn pending_commands(cli: &Cli) -> Vec<CommandSpec> {
    if cli.command.is_empty() {
        Vec::new()
    } else {
        vec![CommandSpec::Argv(cli.command.clone())]
    }
}
