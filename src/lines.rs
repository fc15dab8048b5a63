//! Lazy line-by-line file reading

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Open `path` for lazy line reading.
///
/// # Errors
///
/// Returns `Error::Filesystem` naming the path if the file cannot be opened.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Lines> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to open {}: {}", path.display(), e),
    })?;

    Ok(Lines {
        path: path.to_path_buf(),
        inner: Some(BufReader::new(file).lines()),
    })
}

/// Forward-only iterator over the lines of a file, without line endings.
///
/// The file handle is dropped as soon as the lines run out or a read fails,
/// and of course when the iterator itself is dropped. It cannot be restarted.
#[derive(Debug)]
pub struct Lines {
    path: PathBuf,
    inner: Option<io::Lines<BufReader<File>>>,
}

impl Lines {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once the underlying file has been released.
    pub fn is_exhausted(&self) -> bool {
        self.inner.is_none()
    }
}

impl Iterator for Lines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let lines = self.inner.as_mut()?;
        match lines.next() {
            Some(Ok(line)) => Some(Ok(line)),
            Some(Err(e)) => {
                self.inner = None;
                Some(Err(Error::Filesystem {
                    message: format!("Failed to read {}: {}", self.path.display(), e),
                }))
            }
            None => {
                self.inner = None;
                None
            }
        }
    }
}
