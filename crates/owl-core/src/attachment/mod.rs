//! Local files turned into sendable, classified attachments.

mod kind;
mod loader;
mod opener;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;

pub use kind::{detect_kind, MediaKind};
pub use loader::AttachmentLoader;
pub use opener::OsFileOpener;

use crate::ports::{ByteStream, MultipartFile};

pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Bytes to whole megabytes, rounded to nearest.
pub fn bytes_to_megabytes(size: u64) -> u64 {
    (size as f64 / BYTES_PER_MEGABYTE as f64).round() as u64
}

/// A loaded local file, tagged with the media kind it will be sent as.
pub struct Attachment {
    pub kind: MediaKind,
    /// Base name only; never the full path.
    pub file_name: String,
    pub size_bytes: u64,
    stream: Option<ByteStream>,
}

impl Attachment {
    pub fn new(
        kind: MediaKind,
        file_name: impl Into<String>,
        size_bytes: u64,
        stream: ByteStream,
    ) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            size_bytes,
            stream: Some(stream),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    /// Release the underlying handle. Closing twice is a no-op.
    pub fn close(&mut self) {
        drop(self.stream.take());
    }

    /// Hand the stream over to a multipart part named `field_name`.
    ///
    /// A closed attachment yields an empty part.
    pub fn into_multipart(mut self, field_name: impl Into<String>) -> MultipartFile {
        let reader = self
            .stream
            .take()
            .unwrap_or_else(|| Box::new(std::io::empty()));
        MultipartFile {
            field_name: field_name.into(),
            file_name: self.file_name,
            size_bytes: self.size_bytes,
            reader,
        }
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Ordered attachment batch. Position matters: index `i` is sent as `file{i}`
/// and the last item carries the caption.
pub type Attachments = Vec<Attachment>;
