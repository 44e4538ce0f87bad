use std::{collections::BTreeMap, fmt, io, io::Read, path::Path};

use crate::Result;

/// Byte stream of an opened attachment. Dropping it closes the underlying handle.
pub type ByteStream = Box<dyn Read + Send>;

/// Ordered form field map for multipart submissions.
pub type FormFields = BTreeMap<String, String>;

/// A freshly opened local file.
pub struct OpenedFile {
    pub stream: ByteStream,
    pub size_bytes: u64,
}

impl fmt::Debug for OpenedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenedFile")
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Hexagonal port for file access.
///
/// The attachment loader only talks to this trait, so tests can hand it in-memory
/// streams and check that every one of them gets released.
pub trait FileOpener {
    fn open(&self, path: &Path) -> io::Result<OpenedFile>;
}

/// One file part of a multipart request.
pub struct MultipartFile {
    pub field_name: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub reader: ByteStream,
}

impl fmt::Debug for MultipartFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartFile")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Hexagonal port for the Bot API HTTP boundary.
///
/// `method` is the Bot API method name (`sendMessage`, `sendMediaGroup`, ...).
/// Implementations must report transport failures as [`crate::Error::Transport`]
/// and API-level failures as [`crate::Error::Api`] / [`crate::Error::UnexpectedResponse`].
pub trait BotApi: Send + Sync {
    fn submit_json(&self, method: &str, body: &serde_json::Value) -> Result<()>;

    /// Files are consumed: their streams are closed once the call returns.
    fn submit_multipart(
        &self,
        method: &str,
        fields: &FormFields,
        files: Vec<MultipartFile>,
    ) -> Result<()>;
}
