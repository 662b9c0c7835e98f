use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ToolchainError {
    UnknownPackage(String),
    UnsupportedPlatform(String, String),
    UnsupportedVersion(String, String),
    DownloadFailed(String, String),
    UnsupportedArchiveFormat(String),
    ExtractionFailed(String, String),
    CommandFailed(String, i32),
    Io(String),
}

impl ToolchainError {
    /// Process exit status this error should surface as. A failing child
    /// command propagates its own code; everything else is a plain failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed(_, code) => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for ToolchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPackage(name) => {
                write!(f, "Package '{name}' is not in the catalog")
            }
            Self::UnsupportedPlatform(name, platform) => {
                write!(f, "Package '{name}' has no download for platform '{platform}'")
            }
            Self::UnsupportedVersion(name, version) => {
                write!(f, "Package '{name}' has no download for version '{version}'")
            }
            Self::DownloadFailed(name, reason) => {
                write!(f, "Failed to download '{name}': {reason}")
            }
            Self::UnsupportedArchiveFormat(file) => {
                write!(f, "Archive '{file}' has an unsupported format (expected .zip or .tar.gz)")
            }
            Self::ExtractionFailed(name, reason) => {
                write!(f, "Failed to extract '{name}': {reason}")
            }
            Self::CommandFailed(command, code) => {
                write!(f, "Command '{command}' failed with exit code {code}")
            }
            Self::Io(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for ToolchainError {}

impl From<io::Error> for ToolchainError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ToolchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_propagates_code() {
        let err = ToolchainError::CommandFailed("haxe -version".to_string(), 42);
        assert_eq!(err.exit_code(), 42);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = ToolchainError::UnknownPackage("hxcpp".to_string());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_messages_name_the_culprit() {
        let err = ToolchainError::DownloadFailed("neko".to_string(), "HTTP 404".to_string());
        assert!(err.to_string().contains("neko"));
        assert!(err.to_string().contains("HTTP 404"));
    }
}
