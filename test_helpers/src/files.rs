//! Temporary directories for config files.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory, removed on drop, that hands out UTF-8 paths.
///
/// # Examples
///
/// ```
/// use layerflags_test_helpers::files::ConfigDir;
///
/// # fn main() -> std::io::Result<()> {
/// let dir = ConfigDir::new()?;
/// let path = dir.write("app.conf", "verbose true\n")?;
/// assert_eq!(std::fs::read_to_string(&path)?, "verbose true\n");
/// assert!(!dir.path("missing.conf").exists());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    root: Utf8PathBuf,
    _dir: TempDir,
}

impl ConfigDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).map_err(|path| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("temporary directory {} is not UTF-8", path.display()),
            )
        })?;
        Ok(Self { root, _dir: dir })
    }

    /// Directory root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Writes `contents` to `name` and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigDir;

    #[test]
    fn files_live_under_the_root_until_drop() {
        let dir = ConfigDir::new().expect("create config dir");
        let path = dir.write("a.toml", "x = 1\n").expect("write config");
        assert!(path.starts_with(dir.root()));
        assert!(path.exists());
        let root = dir.root().to_owned();
        drop(dir);
        assert!(!root.exists());
    }
}
