//! Shared utility functions for CLI commands

use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Directory holding the running executable, with symlinks resolved
///
/// Templates are read from and outputs written to this directory.
pub fn program_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()?.canonicalize()?;
    exe_dir(&exe)
}

fn exe_dir(exe: &Path) -> Result<PathBuf> {
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| CliError::io(format!("{} has no parent directory", exe.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exe_dir() {
        assert_eq!(
            exe_dir(Path::new("/opt/connpack/connpack")).unwrap(),
            PathBuf::from("/opt/connpack")
        );
        assert!(exe_dir(Path::new("/")).is_err());
    }

    #[test]
    fn test_program_root_is_absolute_dir() {
        let root = program_root().unwrap();
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }
}
