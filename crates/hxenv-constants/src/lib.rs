pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Instant, reproducible Haxe toolchain environments";
pub const REPOSITORY_URL: &str = "https://github.com/hxenv/hxenv";
pub const BIN_NAME: &str = "hxenv";

pub const USER_AGENT: &str = "hxenv/0.1.0";

pub const DEFAULT_HAXE_VERSION: &str = "3.4.3";
pub const DEFAULT_NEKO_VERSION: &str = "auto";
pub const DEFAULT_INSTALL_DIR: &str = ".hxenv";

/// Toolchain archives run into the hundreds of megabytes; the read timeout
/// covers the whole body, not a single chunk.
pub const HTTP_TIMEOUT_SECS: u64 = 600;
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 20;

pub const EXAMPLES: &[(&str, &str)] = &[
    ("hxenv -i", "Install the default toolchain into .hxenv"),
    ("hxenv -- haxe -version", "Run haxe inside the provisioned environment"),
    (
        "hxenv --haxe-version latest -- haxe -version",
        "Use a nightly compiler build",
    ),
    (
        "hxenv -- haxe -main HelloWorld -neko out.n",
        "Compile to Neko bytecode",
    ),
    ("hxenv -- neko out.n", "Run the compiled program"),
    (
        "hxenv --export env.sh --shell sh",
        "Write the environment as a shell export script",
    ),
];
