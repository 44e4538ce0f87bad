//! `sendMediaGroup`: <https://core.telegram.org/bots/api#sendmediagroup>
//!
//! Photos, videos, documents or audios sent as one album. The caption goes on the
//! last item, which Telegram renders as the caption of the whole group.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    attachment::Attachments,
    domain::ParseMode,
    errors::Error,
    methods::{is_false, too_long, Violations, MAX_TEXT_LENGTH},
    ports::{BotApi, FormFields, MultipartFile},
    utils::to_form_fields,
    Result,
};

pub const METHOD: &str = "sendMediaGroup";

#[derive(Debug, Default)]
pub struct SendMediaGroupOptions {
    pub chat_id: String,
    pub message_thread_id: String,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub has_spoiler: bool,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub attachments: Attachments,
}

#[derive(Debug, Serialize)]
struct MediaGroupPayload {
    chat_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    message_thread_id: String,
    media: String,
    #[serde(skip_serializing_if = "is_false")]
    disable_notification: bool,
    #[serde(skip_serializing_if = "is_false")]
    protect_content: bool,
}

/// One `InputMedia*` descriptor inside the `media` field.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct InputMedia {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_spoiler: bool,
}

/// Form fields plus one file part per attachment, ready for a multipart submit.
#[derive(Debug)]
pub struct MediaGroupRequest {
    pub fields: FormFields,
    pub files: Vec<MultipartFile>,
}

impl SendMediaGroupOptions {
    pub fn validate(&self) -> Result<()> {
        let mut v = Violations::default();
        v.check(!self.chat_id.is_empty(), || "chat ID is required".to_string());
        v.check(!self.attachments.is_empty(), || {
            "at least one attachment required".to_string()
        });
        let caption_len = self.caption.chars().count();
        v.check(caption_len <= MAX_TEXT_LENGTH, || too_long(caption_len));
        v.into_result()
    }

    /// Validate and turn the options into a multipart request.
    ///
    /// Consumes the options: attachment streams move into the file parts, or are
    /// closed here if validation or encoding fails.
    pub fn prepare_request(self) -> Result<MediaGroupRequest> {
        self.validate()
            .map_err(Error::send_media_group("invalid options"))?;

        let SendMediaGroupOptions {
            chat_id,
            message_thread_id,
            caption,
            parse_mode,
            has_spoiler,
            disable_notification,
            protect_content,
            attachments,
        } = self;

        let (media, files) = build_media(attachments, caption, parse_mode, has_spoiler);
        // On error `files` is dropped, closing every attachment stream.
        let media = serde_json::to_string(&media).map_err(|e| {
            Error::send_media_group("failed to convert media data to JSON")(e.into())
        })?;

        let payload = MediaGroupPayload {
            chat_id,
            message_thread_id,
            media,
            disable_notification,
            protect_content,
        };
        let fields = to_form_fields(&payload).map_err(Error::send_media_group(
            "unable to create form fields from the payload",
        ))?;

        Ok(MediaGroupRequest { fields, files })
    }
}

/// One descriptor and one `file{i}` part per attachment, in order.
fn build_media(
    attachments: Attachments,
    caption: String,
    parse_mode: Option<ParseMode>,
    has_spoiler: bool,
) -> (Vec<InputMedia>, Vec<MultipartFile>) {
    let mut media = Vec::with_capacity(attachments.len());
    let mut files = Vec::with_capacity(attachments.len());

    for (i, attachment) in attachments.into_iter().enumerate() {
        let field_name = format!("file{i}");
        media.push(InputMedia {
            kind: attachment.kind.wire_name(),
            media: format!("attach://{field_name}"),
            caption: String::new(),
            parse_mode: None,
            has_spoiler,
        });
        files.push(attachment.into_multipart(field_name));
    }

    if let Some(last) = media.last_mut() {
        if !caption.is_empty() {
            last.parse_mode = parse_mode.map(ParseMode::wire_value);
        }
        last.caption = caption;
    }

    (media, files)
}

/// Sends media groups through a [`BotApi`].
#[derive(Clone)]
pub struct MediaGroupSender {
    api: Arc<dyn BotApi>,
}

impl MediaGroupSender {
    pub fn new(api: Arc<dyn BotApi>) -> Self {
        Self { api }
    }

    pub fn send(&self, opts: SendMediaGroupOptions) -> Result<()> {
        let count = opts.attachments.len();
        let request = opts.prepare_request()?;

        tracing::debug!(count, "sending media group");
        self.api
            .submit_multipart(METHOD, &request.fields, request.files)
            .map_err(Error::send_media_group("failed to send media"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::{
        testing::{StreamProbe, TrackedStream},
        Attachment, MediaKind,
    };
    use crate::{errors::render_chain, methods::testing::RecordingApi};

    fn attachment(kind: MediaKind, name: &str) -> (Attachment, StreamProbe) {
        let (stream, probe) = TrackedStream::new(name);
        (
            Attachment::new(kind, name, name.len() as u64, Box::new(stream)),
            probe,
        )
    }

    fn photos(names: &[&str]) -> Attachments {
        names
            .iter()
            .map(|n| attachment(MediaKind::Photo, n).0)
            .collect()
    }

    #[test]
    fn validation_reports_every_problem() {
        let err = SendMediaGroupOptions::default().validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("chat ID is required"), "{msg}");
        assert!(msg.contains("at least one attachment required"), "{msg}");
    }

    #[test]
    fn caption_counted_in_code_points() {
        let mut opts = SendMediaGroupOptions {
            chat_id: "123".into(),
            caption: "é".repeat(MAX_TEXT_LENGTH),
            attachments: photos(&["a.jpg"]),
            ..Default::default()
        };
        assert!(opts.validate().is_ok());

        opts.caption.push('é');
        let err = opts.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("message is too long: must be <= 4096 characters, got 4097"));
    }

    #[test]
    fn album_with_caption_and_spoiler() {
        let request = SendMediaGroupOptions {
            chat_id: "123".into(),
            caption: "hello".into(),
            has_spoiler: true,
            attachments: photos(&["one.jpg", "two.jpg"]),
            ..Default::default()
        }
        .prepare_request()
        .unwrap();

        assert_eq!(
            request.fields["media"],
            r#"[{"type":"photo","media":"attach://file0","has_spoiler":true},{"type":"photo","media":"attach://file1","caption":"hello","has_spoiler":true}]"#
        );
        assert_eq!(request.fields["chat_id"], "123");
        assert!(!request.fields.contains_key("message_thread_id"));
        assert!(!request.fields.contains_key("disable_notification"));

        let parts: Vec<_> = request
            .files
            .iter()
            .map(|f| (f.field_name.as_str(), f.file_name.as_str()))
            .collect();
        assert_eq!(parts, vec![("file0", "one.jpg"), ("file1", "two.jpg")]);
    }

    #[test]
    fn parse_mode_goes_with_caption() {
        let request = SendMediaGroupOptions {
            chat_id: "123".into(),
            caption: "*bold*".into(),
            parse_mode: Some(ParseMode::Markdown),
            attachments: photos(&["a.jpg", "b.jpg"]),
            ..Default::default()
        }
        .prepare_request()
        .unwrap();

        let media: serde_json::Value = serde_json::from_str(&request.fields["media"]).unwrap();
        assert!(media[0].get("parse_mode").is_none());
        assert_eq!(media[1]["parse_mode"], "MarkdownV2");
        assert_eq!(media[1]["caption"], "*bold*");
    }

    #[test]
    fn flags_render_as_form_booleans() {
        let request = SendMediaGroupOptions {
            chat_id: "75757".into(),
            message_thread_id: "1234".into(),
            disable_notification: true,
            protect_content: true,
            attachments: vec![attachment(MediaKind::Document, "report.pdf").0],
            ..Default::default()
        }
        .prepare_request()
        .unwrap();

        assert_eq!(request.fields["message_thread_id"], "1234");
        assert_eq!(request.fields["disable_notification"], "1");
        assert_eq!(request.fields["protect_content"], "1");
        assert_eq!(
            request.fields["media"],
            r#"[{"type":"document","media":"attach://file0"}]"#
        );
    }

    #[test]
    fn failed_validation_closes_attachments() {
        let (a, probe) = attachment(MediaKind::Photo, "a.jpg");
        let err = SendMediaGroupOptions {
            attachments: vec![a],
            ..Default::default()
        }
        .prepare_request()
        .unwrap_err();

        assert!(render_chain(&err).contains("chat ID is required"));
        assert_eq!(probe.drops(), 1);
    }

    #[test]
    fn sender_submits_every_file_and_closes_them() {
        let (a, probe_a) = attachment(MediaKind::Photo, "a.jpg");
        let (b, probe_b) = attachment(MediaKind::Video, "b.mp4");
        let api = Arc::new(RecordingApi::default());

        MediaGroupSender::new(api.clone())
            .send(SendMediaGroupOptions {
                chat_id: "123".into(),
                attachments: vec![a, b],
                ..Default::default()
            })
            .unwrap();

        let calls = api.multipart_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "sendMediaGroup");
        assert_eq!(calls[0].files.len(), 2);
        assert_eq!(calls[0].files[0].field_name, "file0");
        assert_eq!(calls[0].files[0].content, "a.jpg");
        assert_eq!(calls[0].files[1].field_name, "file1");
        assert_eq!(calls[0].files[1].file_name, "b.mp4");
        assert_eq!(probe_a.drops(), 1);
        assert_eq!(probe_b.drops(), 1);
    }

    #[test]
    fn sender_wraps_errors() {
        let api = Arc::new(RecordingApi::default());
        let err = MediaGroupSender::new(api.clone())
            .send(SendMediaGroupOptions::default())
            .unwrap_err();
        assert!(render_chain(&err).starts_with("send media: invalid options: validation failed:"));
        assert!(api.multipart_calls().is_empty());

        let api = Arc::new(RecordingApi::failing(413, "Request Entity Too Large"));
        let err = MediaGroupSender::new(api)
            .send(SendMediaGroupOptions {
                chat_id: "1".into(),
                attachments: photos(&["a.jpg"]),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(
            render_chain(&err),
            "send media: failed to send media: API error [sendMediaGroup] (HTTP 413): 413 - Request Entity Too Large"
        );
    }
}
