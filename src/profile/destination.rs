//! Source and destination profile paths, backups and appending

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::ProfileError;

/// Candidate bash profiles, in lookup order, relative to the home directory.
pub const SOURCE_CANDIDATES: [&str; 2] = [".bashrc", ".bash_profile"];

pub const PROFILE_FILE_NAME: &str = "Microsoft.PowerShell_profile.ps1";

/// First existing bash profile under `home`.
pub fn find_source_profile(home: &Path) -> Option<PathBuf> {
    SOURCE_CANDIDATES
        .iter()
        .map(|name| home.join(name))
        .find(|path| path.exists())
}

/// Ask PowerShell for `$PROFILE`, falling back to the platform default.
pub fn resolve_destination() -> PathBuf {
    match query_powershell_profile() {
        Some(path) => path,
        None => {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            let fallback = default_destination(&home, cfg!(windows));
            debug!(path = %fallback.display(), "using fallback PowerShell profile path");
            fallback
        }
    }
}

/// `pwsh` when it is on PATH, otherwise Windows PowerShell.
fn powershell_program() -> &'static str {
    if which::which("pwsh").is_ok() {
        "pwsh"
    } else {
        "powershell.exe"
    }
}

fn query_powershell_profile() -> Option<PathBuf> {
    let program = powershell_program();
    let output = Command::new(program)
        .args(["-NoProfile", "-Command", "$PROFILE"])
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let path = stdout.trim();
            if path.is_empty() {
                debug!(program, "PowerShell returned an empty $PROFILE");
                None
            } else {
                Some(PathBuf::from(path))
            }
        }
        Ok(output) => {
            debug!(program, status = %output.status, "PowerShell exited unsuccessfully");
            None
        }
        Err(err) => {
            debug!(program, error = %err, "could not launch PowerShell");
            None
        }
    }
}

/// Platform-conditional default profile location.
pub fn default_destination(home: &Path, windows: bool) -> PathBuf {
    if windows {
        home.join("Documents").join("PowerShell").join(PROFILE_FILE_NAME)
    } else {
        home.join(".config").join("powershell").join(PROFILE_FILE_NAME)
    }
}

/// `<dest>.bak` next to the destination.
pub fn backup_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy an existing destination to `<dest>.bak`. A missing destination is not an error.
pub fn backup_existing(dest: &Path) -> Result<Option<PathBuf>, ProfileError> {
    if !dest.exists() {
        return Ok(None);
    }
    let backup = backup_path(dest);
    fs::copy(dest, &backup).map_err(|source| ProfileError::Backup {
        path: backup.clone(),
        source,
    })?;
    Ok(Some(backup))
}

/// Append `content`, creating the parent directories and the file as needed.
pub fn append_profile(dest: &Path, content: &str) -> Result<(), ProfileError> {
    let write_err = |source: std::io::Error| ProfileError::Write {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dest)
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;
    Ok(())
}
