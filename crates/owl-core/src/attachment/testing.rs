//! In-memory fakes for the file port.

use std::{
    cell::RefCell,
    collections::HashMap,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use crate::ports::{FileOpener, OpenedFile};

/// Stream that counts how many times it has been dropped (closed).
pub struct TrackedStream {
    data: Cursor<Vec<u8>>,
    drops: Arc<AtomicUsize>,
}

#[derive(Clone, Debug)]
pub struct StreamProbe(Arc<AtomicUsize>);

impl StreamProbe {
    pub fn drops(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.drops() > 0
    }
}

impl TrackedStream {
    pub fn new(content: &str) -> (Self, StreamProbe) {
        let drops = Arc::new(AtomicUsize::new(0));
        let stream = Self {
            data: Cursor::new(content.as_bytes().to_vec()),
            drops: Arc::clone(&drops),
        };
        (stream, StreamProbe(drops))
    }
}

impl Read for TrackedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// File opener over a fixed table of `path -> size`.
///
/// Every successful open hands out a fresh [`TrackedStream`] and records its probe.
#[derive(Default)]
pub struct FakeOpener {
    files: HashMap<PathBuf, u64>,
    opened: RefCell<Vec<(PathBuf, StreamProbe)>>,
}

impl FakeOpener {
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(p, size)| (PathBuf::from(p), size))
                .collect(),
            opened: RefCell::new(Vec::new()),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opened.borrow().len()
    }

    pub fn probes(&self) -> Vec<(PathBuf, StreamProbe)> {
        self.opened.borrow().clone()
    }
}

impl FileOpener for FakeOpener {
    fn open(&self, path: &Path) -> io::Result<OpenedFile> {
        let Some(&size_bytes) = self.files.get(path) else {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        };

        let (stream, probe) = TrackedStream::new("dummy content");
        self.opened.borrow_mut().push((path.to_path_buf(), probe));

        Ok(OpenedFile {
            stream: Box::new(stream),
            size_bytes,
        })
    }
}
