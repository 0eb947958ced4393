use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Error type for session lock acquisition
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("could not create lock file at {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("another taskdeck session is already using {path}")]
    Busy { path: PathBuf },
}

/// Advisory lock on the data dir, enforcing the single-active-session
/// assumption the persistence protocol relies on. Released on drop.
pub struct SessionLock {
    _file: File,
    path: PathBuf,
}

impl SessionLock {
    /// Acquire the session lock, retrying briefly so back-to-back CLI
    /// invocations don't fail spuriously.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, SessionError> {
        let path = data_dir.join("session.lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| SessionError::Create {
                path: path.clone(),
                source,
            })?;

        let start = Instant::now();
        loop {
            if try_lock(&file).is_ok() {
                return Ok(SessionLock { _file: file, path });
            }
            if start.elapsed() >= timeout {
                return Err(SessionError::Busy { path });
            }
            std::thread::sleep(Duration::from_millis(25));
        }
    }

    /// Acquire with the default 2-second timeout
    pub fn acquire_default(data_dir: &Path) -> Result<Self, SessionError> {
        Self::acquire(data_dir, Duration::from_secs(2))
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        // flock releases with the fd; the file itself is just tidiness
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_then_reacquire_after_release() {
        let dir = TempDir::new().unwrap();
        let lock = SessionLock::acquire_default(dir.path());
        assert!(lock.is_ok());
        drop(lock);
        assert!(SessionLock::acquire_default(dir.path()).is_ok());
    }

    #[test]
    fn second_session_is_rejected() {
        let dir = TempDir::new().unwrap();
        let _held = SessionLock::acquire_default(dir.path()).unwrap();
        let second = SessionLock::acquire(dir.path(), Duration::from_millis(50));
        assert!(matches!(second, Err(SessionError::Busy { .. })));
    }
}
