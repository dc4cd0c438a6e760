//! Bash profile to PowerShell profile conversion
//!
//! [`translate`] holds the pure line engine; [`destination`] deals with the
//! filesystem and with asking PowerShell where its profile lives.

pub mod destination;
pub mod translate;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use destination::*;
pub use translate::*;

/// Errors raised while converting a profile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read bash profile {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to back up PowerShell profile to {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write PowerShell profile {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a conversion did
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub destination: PathBuf,
    pub backup: Option<PathBuf>,
    pub translation: Translation,
}

/// Read and translate a bash profile without touching the destination.
pub fn translate_file(source: &Path) -> Result<Translation, ProfileError> {
    let text = fs::read_to_string(source).map_err(|err| ProfileError::Read {
        path: source.to_path_buf(),
        source: err,
    })?;
    Ok(translate_lines(text.lines()))
}

/// Translate `source`, back up `dest` if present, and append the result to `dest`.
pub fn convert_profile(source: &Path, dest: &Path) -> Result<ConvertOutcome, ProfileError> {
    let translation = translate_file(source)?;
    let backup = backup_existing(dest)?;
    append_profile(dest, &render_profile(&translation))?;

    Ok(ConvertOutcome {
        destination: dest.to_path_buf(),
        backup,
        translation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_read_error_display() {
        let err = ProfileError::Read {
            path: PathBuf::from("/nope/.bashrc"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read bash profile /nope/.bashrc: not found"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_write_error_display() {
        let err = ProfileError::Write {
            path: PathBuf::from("p.ps1"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("p.ps1"));
        assert!(err.to_string().contains("denied"));
    }
}
