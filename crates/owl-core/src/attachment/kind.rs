use std::{fmt, path::Path};

/// Media kind as understood by `sendMediaGroup`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    /// `type` value of an `InputMedia*` descriptor.
    pub fn wire_name(self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
        }
    }

    /// Kinds that may be mixed inside one album.
    pub fn is_visual(self) -> bool {
        matches!(self, MediaKind::Photo | MediaKind::Video)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Detect the media kind of a file from its extension, falling back to `Document`.
///
/// # Panics
///
/// Panics on an empty file name; callers always pass a real path.
pub fn detect_kind(file_name: &str) -> MediaKind {
    assert!(!file_name.is_empty(), "file name is empty");

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "bmp" | "webp" => MediaKind::Photo,
        "mp3" | "m4a" | "wav" | "flac" | "aac" => MediaKind::Audio,
        "mp4" | "mov" | "mkv" | "gif" => MediaKind::Video,
        _ => MediaKind::Document,
    }
}
