use std::env;
use std::fmt;

/// Target platform of a toolchain download. 64-bit only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Win,
    Osx,
    Linux,
}

impl Platform {
    /// Platform the current process runs on. Hosts outside the supported
    /// set fall back to the linux downloads, the only ones with a chance
    /// of working there.
    #[must_use]
    pub fn host() -> Self {
        match env::consts::OS {
            "windows" => Self::Win,
            "macos" => Self::Osx,
            _ => Self::Linux,
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "win" => Some(Self::Win),
            "osx" => Some(Self::Osx),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Key used in catalog URL tables and the `{platform}` placeholder.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Osx => "osx",
            Self::Linux => "linux",
        }
    }

    /// Vendor-style platform name, the `{platform2}` placeholder. Used by
    /// download services that do not share our short keys.
    #[must_use]
    pub fn alias(self) -> &'static str {
        match self {
            Self::Win => "win32-x64-archive",
            Self::Osx => "darwin",
            Self::Linux => "linux-x64",
        }
    }

    /// Default archive extension for this platform, the `{extension}`
    /// placeholder.
    #[must_use]
    pub fn archive_ext(self) -> &'static str {
        match self {
            Self::Win | Self::Osx => "zip",
            Self::Linux => "tar.gz",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
