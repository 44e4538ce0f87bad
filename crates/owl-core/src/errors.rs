use std::path::PathBuf;

/// Core error type for telegram-owl.
///
/// Adapter crates map their library errors into this type. Wrapping variants keep
/// the underlying error as their `source`, so the display of one variant never
/// repeats its cause; callers render the whole chain.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no attachments provided")]
    NoAttachments,

    #[error("too many attachments: max allowed is {max}, but got {got}")]
    TooManyAttachments { max: usize, got: usize },

    #[error("attachment {path:?}: size {size_mb} MB exceeds the max allowed of {max_mb} MB")]
    AttachmentTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    #[error("total attachments size exceeds the max allowed {max_mb} MB")]
    TotalSizeExceeded { max_mb: u64 },

    #[error("failed to read attachment {}", .path.display())]
    AttachmentIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// `sendMessage` could not be prepared or submitted.
    #[error("send: {stage}")]
    SendMessage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// `sendMediaGroup` could not be prepared or submitted.
    #[error("send media: {stage}")]
    SendMediaGroup {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error [{endpoint}] (HTTP {status}): {code} - {description}")]
    Api {
        endpoint: String,
        status: u16,
        code: i64,
        description: String,
    },

    #[error("unexpected error (status={status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn send_message(stage: &'static str) -> impl FnOnce(Error) -> Error {
        move |e| Error::SendMessage {
            stage,
            source: Box::new(e),
        }
    }

    pub(crate) fn send_media_group(stage: &'static str) -> impl FnOnce(Error) -> Error {
        move |e| Error::SendMediaGroup {
            stage,
            source: Box::new(e),
        }
    }
}

/// `err` followed by each of its sources, joined with `": "`.
#[cfg(test)]
pub(crate) fn render_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
