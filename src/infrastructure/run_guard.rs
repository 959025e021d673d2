//! Local Run Guard
//!
//! Advisory file lock preventing two shipyard runs from the same checkout.
//! The lock is released when the guard is dropped or the process dies.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{ShipyardError, ShipyardResult};

#[derive(Debug)]
pub struct RunGuard {
    file: File,
    path: PathBuf,
}

impl RunGuard {
    /// Take the guard without waiting.
    pub fn acquire(path: &Path) -> ShipyardResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        if let Err(e) = file.try_lock_exclusive() {
            return Err(match e.kind() {
                io::ErrorKind::WouldBlock => ShipyardError::RunInProgress {
                    path: path.to_path_buf(),
                },
                _ if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                    ShipyardError::RunInProgress {
                        path: path.to_path_buf(),
                    }
                }
                _ => e.into(),
            });
        }

        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_guard_is_refused_while_first_is_held() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".shipyard/run.lock");

        let first = RunGuard::acquire(&path).unwrap();
        let second = RunGuard::acquire(&path);

        assert!(matches!(second, Err(ShipyardError::RunInProgress { .. })));
        assert_eq!(first.path(), path.as_path());
    }

    #[test]
    fn guard_is_released_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.lock");

        drop(RunGuard::acquire(&path).unwrap());
        assert!(RunGuard::acquire(&path).is_ok());
    }
}
