//! `sendMessage`: <https://core.telegram.org/bots/api#sendmessage>

use std::sync::Arc;

use serde::Serialize;

use crate::{
    domain::ParseMode,
    errors::Error,
    methods::{is_false, too_long, Violations, MAX_TEXT_LENGTH},
    ports::BotApi,
    Result,
};

pub const METHOD: &str = "sendMessage";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendMessageOptions {
    pub chat_id: String,
    pub message_thread_id: String,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_notification: bool,
    pub protect_content: bool,
    pub disable_link_preview: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SendMessagePayload {
    pub chat_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message_thread_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub protect_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_preview_options: Option<LinkPreviewOptions>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LinkPreviewOptions {
    pub is_disabled: bool,
}

impl SendMessageOptions {
    pub fn validate(&self) -> Result<()> {
        let mut v = Violations::default();
        v.check(!self.chat_id.is_empty(), || "chat ID is required".to_string());
        v.check(!self.text.is_empty(), || "message is required".to_string());
        // Measured in bytes.
        v.check(self.text.len() <= MAX_TEXT_LENGTH, || too_long(self.text.len()));
        v.into_result()
    }

    pub fn prepare_payload(&self) -> Result<SendMessagePayload> {
        self.validate()?;

        Ok(SendMessagePayload {
            chat_id: self.chat_id.clone(),
            message_thread_id: self.message_thread_id.clone(),
            text: self.text.clone(),
            parse_mode: self.parse_mode.map(ParseMode::wire_value),
            disable_notification: self.disable_notification,
            protect_content: self.protect_content,
            link_preview_options: self
                .disable_link_preview
                .then_some(LinkPreviewOptions { is_disabled: true }),
        })
    }
}

/// Sends text messages through a [`BotApi`].
#[derive(Clone)]
pub struct MessageSender {
    api: Arc<dyn BotApi>,
}

impl MessageSender {
    pub fn new(api: Arc<dyn BotApi>) -> Self {
        Self { api }
    }

    pub fn send(&self, opts: &SendMessageOptions) -> Result<()> {
        let payload = opts
            .prepare_payload()
            .map_err(Error::send_message("invalid options"))?;
        let body = serde_json::to_value(&payload)
            .map_err(|e| Error::send_message("failed to encode payload")(e.into()))?;

        tracing::debug!(chat_id = %opts.chat_id, len = opts.text.len(), "sending message");
        self.api
            .submit_json(METHOD, &body)
            .map_err(Error::send_message("failed to send message"))
    }
}
