use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use hxenv_catalog::Package;
use hxenv_error::{Result, ToolchainError};

/// Unpacks the archive into `dest`, dispatching on the archive file
/// extension.
pub fn extract(package: &Package, archive_path: &Path, dest: &Path) -> Result<()> {
    if package.archive_file.ends_with(".zip") {
        fs::create_dir_all(dest)?;
        extract_zip(archive_path, dest)
            .map_err(|e| ToolchainError::ExtractionFailed(package.name.clone(), e.to_string()))
    } else if package.archive_file.ends_with(".tar.gz") {
        fs::create_dir_all(dest)?;
        extract_tar_gz(archive_path, dest)
            .map_err(|e| ToolchainError::ExtractionFailed(package.name.clone(), e.to_string()))
    } else {
        Err(ToolchainError::UnsupportedArchiveFormat(
            package.archive_file.clone(),
        ))
    }
}

fn extract_zip(archive_path: &Path, dest: &Path) -> zip::result::ZipResult<()> {
    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    archive.extract(dest)
}

fn extract_tar_gz(archive_path: &Path, dest: &Path) -> io::Result<()> {
    let file = File::open(archive_path)?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);
    archive.unpack(dest)
}

/// Promotes a lone top-level directory: archives commonly wrap their
/// payload in one folder, and export paths must resolve against the
/// package dir regardless of that wrapper's name. Runs at most once per
/// extraction.
pub fn flatten_single_dir(dir: &Path) -> io::Result<()> {
    let entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    if entries.len() != 1 {
        return Ok(());
    }
    let entry = &entries[0];
    if !entry.file_type()?.is_dir() {
        return Ok(());
    }

    let mut staging = dir.as_os_str().to_os_string();
    staging.push(".tmp");
    let staging = PathBuf::from(staging);

    fs::rename(dir, &staging)?;
    fs::rename(staging.join(entry.file_name()), dir)?;
    fs::remove_dir(&staging)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_promotes_single_wrapper() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("pkg");
        fs::create_dir_all(dir.join("wrapper/inner")).unwrap();
        fs::write(dir.join("wrapper/file.txt"), "x").unwrap();

        flatten_single_dir(&dir).unwrap();

        assert!(dir.join("file.txt").is_file());
        assert!(dir.join("inner").is_dir());
        assert!(!dir.join("wrapper").exists());
        assert!(!root.path().join("pkg.tmp").exists());
    }

    #[test]
    fn test_flatten_leaves_multiple_entries_alone() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("pkg");
        fs::create_dir_all(dir.join("a")).unwrap();
        fs::create_dir_all(dir.join("b")).unwrap();

        flatten_single_dir(&dir).unwrap();

        assert!(dir.join("a").is_dir());
        assert!(dir.join("b").is_dir());
    }

    #[test]
    fn test_flatten_leaves_single_file_alone() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("pkg");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("only.txt"), "x").unwrap();

        flatten_single_dir(&dir).unwrap();

        assert!(dir.join("only.txt").is_file());
    }
}
