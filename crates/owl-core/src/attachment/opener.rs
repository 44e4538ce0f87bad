use std::{fs::File, io, path::Path};

use crate::ports::{FileOpener, OpenedFile};

/// [`FileOpener`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFileOpener;

impl FileOpener for OsFileOpener {
    fn open(&self, path: &Path) -> io::Result<OpenedFile> {
        if path.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file path cannot be empty",
            ));
        }

        let file = File::open(path)?;
        // `file` is dropped (closed) if stat fails.
        let meta = file.metadata()?;
        if meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ));
        }

        Ok(OpenedFile {
            stream: Box::new(file),
            size_bytes: meta.len(),
        })
    }
}
