//! Archive extraction into the helper directory.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{LmError, Result};

/// Create the helper bin directory, tolerating pre-existing directories.
///
/// `create_dir_all` handles this on every platform we ship for, but some
/// filesystems reject recursive creation part-way; fall back to creating
/// each missing component individually before giving up.
pub fn ensure_bin_dir(bin_dir: &Path) -> Result<()> {
    if bin_dir.is_dir() {
        return Ok(());
    }

    if fs::create_dir_all(bin_dir).is_ok() {
        return Ok(());
    }

    let mut partial = std::path::PathBuf::new();
    for component in bin_dir.components() {
        partial.push(component);
        if !partial.exists() {
            fs::create_dir(&partial)?;
        }
    }
    Ok(())
}

/// Extract a gzipped tarball into `bin_dir` with the system `tar`.
pub fn extract_archive(archive: &Path, bin_dir: &Path) -> Result<()> {
    let output = Command::new("tar")
        .arg("-C")
        .arg(bin_dir)
        .arg("-xzf")
        .arg(archive)
        .output()
        .map_err(|e| LmError::ExtractFailed {
            message: format!("unable to launch tar: {}", e),
        })?;

    if !output.status.success() {
        return Err(LmError::ExtractFailed {
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_bin_dir_creates_nested_directories() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join(".netlify").join("helper").join("bin");
        ensure_bin_dir(&bin).unwrap();
        assert!(bin.is_dir());
    }

    #[test]
    fn ensure_bin_dir_tolerates_existing_directory() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        ensure_bin_dir(&bin).unwrap();
        assert!(bin.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn extract_archive_unpacks_a_real_tarball() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("git-credential-netlify"), "#!/bin/sh\n").unwrap();

        let archive = temp.path().join("helper.tar.gz");
        let status = Command::new("tar")
            .arg("-C")
            .arg(&src)
            .arg("-czf")
            .arg(&archive)
            .arg("git-credential-netlify")
            .status()
            .unwrap();
        assert!(status.success());

        let bin = temp.path().join("bin");
        ensure_bin_dir(&bin).unwrap();
        extract_archive(&archive, &bin).unwrap();
        assert!(bin.join("git-credential-netlify").is_file());
    }

    #[test]
    fn extract_archive_reports_tar_failure() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("not-an-archive.tar.gz");
        fs::write(&bogus, "definitely not gzip").unwrap();

        let bin = temp.path().join("bin");
        ensure_bin_dir(&bin).unwrap();
        let err = extract_archive(&bogus, &bin).unwrap_err();
        assert!(matches!(err, LmError::ExtractFailed { .. }));
    }
}
