//! Windows installer.
//!
//! Windows installs go through the upstream PowerShell script rather than a
//! tarball: the script handles PATH registration through the registry, which
//! a plain extraction cannot.

use std::fs;
use std::process::Command;

use crate::error::{LmError, Result};

/// Bootstrap script: force TLS 1.2, then fetch and run the upstream installer.
const INSTALL_SCRIPT: &str = r#"[Net.ServicePointManager]::SecurityProtocol = [Net.SecurityProtocolType]::Tls12
iex (iwr -UseBasicParsing -Uri https://github.com/netlify/netlify-credential-helper/raw/master/resources/install.ps1)"#;

/// Run the PowerShell-based installer.
pub fn install_with_powershell() -> Result<()> {
    let temp = tempfile::Builder::new().prefix("netlify-").tempdir()?;
    let script_path = temp.path().join("install.ps1");
    fs::write(&script_path, INSTALL_SCRIPT)?;

    let output = Command::new("powershell")
        .args(["-ExecutionPolicy", "unrestricted", "-File"])
        .arg(&script_path)
        .args(["-windowstyle", "hidden"])
        .output()
        .map_err(|e| LmError::ExtractFailed {
            message: format!("unable to launch powershell: {}", e),
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

    #[test]
    fn install_script_pins_tls_and_fetches_upstream() {
        assert!(INSTALL_SCRIPT.contains("Tls12"));
        assert!(INSTALL_SCRIPT.contains("install.ps1"));
    }
}
