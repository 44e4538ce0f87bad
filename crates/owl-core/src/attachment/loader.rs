use std::{collections::BTreeSet, path::Path};

use crate::{
    attachment::{bytes_to_megabytes, detect_kind, Attachment, Attachments, MediaKind, OsFileOpener},
    config::AttachmentLimits,
    errors::Error,
    ports::FileOpener,
    Result,
};

/// Validates and loads attachments according to configured limits.
///
/// Every handle opened during a failed [`load`](Self::load) is released before the
/// error is returned: loaded attachments are owned by a local batch that is dropped
/// on the error path.
#[derive(Debug)]
pub struct AttachmentLoader<O = OsFileOpener> {
    opener: O,
    limits: AttachmentLimits,
    everything_as_document: bool,
}

impl AttachmentLoader<OsFileOpener> {
    pub fn from_limits(limits: AttachmentLimits) -> Self {
        Self::new(OsFileOpener, limits)
    }
}

impl<O: FileOpener> AttachmentLoader<O> {
    pub fn new(opener: O, limits: AttachmentLimits) -> Self {
        Self {
            opener,
            limits,
            everything_as_document: false,
        }
    }

    /// Send every attachment as a document, bypassing media type detection.
    pub fn everything_as_document(mut self, yes: bool) -> Self {
        self.everything_as_document = yes;
        self
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    pub fn limits(&self) -> &AttachmentLimits {
        &self.limits
    }

    pub fn load<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Attachments> {
        self.check_count(paths.len())?;

        let mut attachments = Attachments::with_capacity(paths.len());
        let mut kinds_found = BTreeSet::new();
        let mut total_bytes: u64 = 0;

        for path in paths {
            // On `?` the batch is dropped, closing everything opened so far.
            let attachment = self.load_one(path.as_ref())?;

            total_bytes = total_bytes.saturating_add(attachment.size_bytes);
            if total_bytes > self.limits.max_total_bytes {
                tracing::debug!(
                    total_bytes,
                    max = self.limits.max_total_bytes,
                    "attachment batch over total size limit"
                );
                return Err(Error::TotalSizeExceeded {
                    max_mb: bytes_to_megabytes(self.limits.max_total_bytes),
                });
            }

            if !self.everything_as_document {
                kinds_found.insert(attachment.kind);
            }
            attachments.push(attachment);
        }

        if !self.everything_as_document && !only_photo_or_video(&kinds_found) {
            tracing::debug!(?kinds_found, "mixed media kinds, sending batch as documents");
            for attachment in &mut attachments {
                attachment.kind = MediaKind::Document;
            }
        }

        Ok(attachments)
    }

    fn check_count(&self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(Error::NoAttachments);
        }
        if count > self.limits.max_attachments {
            return Err(Error::TooManyAttachments {
                max: self.limits.max_attachments,
                got: count,
            });
        }
        Ok(())
    }

    fn load_one(&self, path: &Path) -> Result<Attachment> {
        let opened = self.opener.open(path).map_err(|source| Error::AttachmentIo {
            path: path.to_path_buf(),
            source,
        })?;

        let kind = self.kind_for(path, opened.size_bytes);

        if opened.size_bytes > self.limits.max_attachment_bytes {
            // `opened` goes out of scope here and closes the handle.
            return Err(Error::AttachmentTooLarge {
                path: path.to_path_buf(),
                size_mb: bytes_to_megabytes(opened.size_bytes),
                max_mb: bytes_to_megabytes(self.limits.max_attachment_bytes),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        tracing::debug!(file = %file_name, size = opened.size_bytes, %kind, "attachment loaded");

        Ok(Attachment::new(
            kind,
            file_name,
            opened.size_bytes,
            opened.stream,
        ))
    }

    fn kind_for(&self, path: &Path, size_bytes: u64) -> MediaKind {
        if self.everything_as_document {
            return MediaKind::Document;
        }

        let kind = detect_kind(&path.to_string_lossy());
        if kind == MediaKind::Photo && size_bytes > self.limits.max_photo_bytes {
            tracing::debug!(path = %path.display(), size_bytes, "photo too large, sending as document");
            return MediaKind::Document;
        }
        kind
    }
}

/// True if every kind in the set may go into an album. Vacuously true for an empty set.
fn only_photo_or_video(kinds: &BTreeSet<MediaKind>) -> bool {
    kinds.iter().all(|k| k.is_visual())
}
