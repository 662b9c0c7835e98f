use std::path::PathBuf;

use hxenv_catalog::Platform;
use hxenv_constants::{DEFAULT_HAXE_VERSION, DEFAULT_INSTALL_DIR, DEFAULT_NEKO_VERSION};

/// Validated configuration the front end hands to the core. One instance
/// per run; resolution happens in [`crate::resolve_packages`].
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// Haxe release (`x.x.x`) or the `latest` nightly key.
    pub haxe_version: String,
    /// Neko release (`x.x.x`) or `auto` to derive one from the compiler
    /// version.
    pub neko_version: String,
    /// VS Code build (`x.y.z`, `stable` or `insider`); `None` leaves the
    /// editor out.
    pub vscode_version: Option<String>,
    pub platform: Platform,
    pub install_root: PathBuf,
    pub debug: bool,
}

impl ToolchainConfig {
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            haxe_version: DEFAULT_HAXE_VERSION.to_string(),
            neko_version: DEFAULT_NEKO_VERSION.to_string(),
            vscode_version: None,
            platform,
            install_root: PathBuf::from(DEFAULT_INSTALL_DIR),
            debug: false,
        }
    }
}
