use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hxenv_catalog::Package;
use hxenv_constants::{HTTP_CONNECT_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, USER_AGENT};
use hxenv_error::{Result, ToolchainError};

use crate::archive;

/// Fetches package archives into the install root and unpacks them, once.
/// Everything is existence-checked, so a second run over a warm install
/// root touches neither the network nor the disk.
pub struct Acquirer {
    client: reqwest::blocking::Client,
}

impl Acquirer {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
                .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new()),
        }
    }

    /// Ensures the package's archive and unpacked directory exist under
    /// `install_root`, downloading and extracting only what is missing.
    /// Returns the unpacked package directory.
    pub fn ensure(&self, package: &Package, install_root: &Path, debug: bool) -> Result<PathBuf> {
        let archive_path = install_root.join(&package.archive_file);
        let package_dir = install_root.join(&package.archive_dir);

        if archive_path.is_file() {
            hxenv_logger::debug(
                &format!("{} -> {} [cached]", package.url, archive_path.display()),
                debug,
            );
        } else {
            self.download(package, install_root, &archive_path, debug)?;
        }

        if !package_dir.exists() {
            hxenv_logger::debug(&format!("Extracting to {}..", package_dir.display()), debug);
            let unpacked = archive::extract(package, &archive_path, &package_dir).and_then(|()| {
                archive::flatten_single_dir(&package_dir).map_err(|e| {
                    ToolchainError::ExtractionFailed(package.name.clone(), e.to_string())
                })
            });
            if let Err(err) = unpacked {
                // A half-written tree must not pass the existence check on
                // the next run.
                let _ = fs::remove_dir_all(&package_dir);
                return Err(err);
            }
        }

        Ok(package_dir)
    }

    fn download(
        &self,
        package: &Package,
        install_root: &Path,
        archive_path: &Path,
        debug: bool,
    ) -> Result<()> {
        fs::create_dir_all(install_root)?;
        hxenv_logger::status(&format!("Downloading {}...", package.name));
        hxenv_logger::debug(
            &format!("{} -> {} [download]", package.url, archive_path.display()),
            debug,
        );

        let mut resp = self
            .client
            .get(&package.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| ToolchainError::DownloadFailed(package.name.clone(), e.to_string()))?;

        // Stage into a temp file and rename on success, so an interrupted
        // download is never mistaken for a cached archive on the next run.
        let mut staged = tempfile::NamedTempFile::new_in(install_root)?;
        let bytes = resp
            .copy_to(staged.as_file_mut())
            .map_err(|e| ToolchainError::DownloadFailed(package.name.clone(), e.to_string()))?;
        staged
            .persist(archive_path)
            .map_err(|e| ToolchainError::DownloadFailed(package.name.clone(), e.to_string()))?;

        hxenv_logger::debug(&format!("Downloaded {} ({bytes} bytes)", package.name), debug);
        Ok(())
    }
}

impl Default for Acquirer {
    fn default() -> Self {
        Self::new()
    }
}
