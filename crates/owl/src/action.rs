use std::path::PathBuf;

use anyhow::{Context, Result};

use owl_core::{
    attachment::AttachmentLoader,
    domain::ParseMode,
    methods::{SendMediaGroupOptions, SendMessageOptions, MAX_TEXT_LENGTH},
    ports::FileOpener,
    Error,
};
use owl_telegram::Client;

/// What the user asked to deliver to one chat.
#[derive(Clone, Debug, Default)]
pub struct Delivery {
    pub chat_id: String,
    pub thread_id: String,
    pub message: String,
    pub format: Option<ParseMode>,
    pub attachment_paths: Vec<PathBuf>,
    pub silent: bool,
    pub no_link_preview: bool,
    pub spoiler: bool,
    pub protect: bool,
}

/// Picks the Bot API calls for a [`Delivery`] and runs them in order.
pub struct Action<'a, O: FileOpener> {
    client: &'a Client,
    loader: &'a AttachmentLoader<O>,
}

impl<'a, O: FileOpener> Action<'a, O> {
    pub fn new(client: &'a Client, loader: &'a AttachmentLoader<O>) -> Self {
        Self { client, loader }
    }

    pub fn execute(&self, d: &Delivery) -> Result<()> {
        if d.message.is_empty() && d.attachment_paths.is_empty() {
            return Err(Error::Usage(
                "nothing to send: provide a --message or --attach flag".to_string(),
            )
            .into());
        }

        if d.attachment_paths.is_empty() {
            return self.send_message(d);
        }

        // Short enough to ride along as the album caption.
        if d.message.chars().count() <= MAX_TEXT_LENGTH {
            return self.send_media_group(d, d.message.clone());
        }

        // Anything over the caption limit is also over the sendMessage limit.
        tracing::warn!(
            len = d.message.len(),
            max = MAX_TEXT_LENGTH,
            "message is too long for a caption and will be rejected after the attachments are sent"
        );
        self.send_media_group(d, String::new())?;
        self.send_message(d)
    }

    fn send_message(&self, d: &Delivery) -> Result<()> {
        self.client.send_message.send(&message_options(d))?;
        Ok(())
    }

    fn send_media_group(&self, d: &Delivery, caption: String) -> Result<()> {
        let attachments = self
            .loader
            .load(&d.attachment_paths)
            .context("failed to load attachments")?;

        self.client.send_media_group.send(SendMediaGroupOptions {
            chat_id: d.chat_id.clone(),
            message_thread_id: d.thread_id.clone(),
            caption,
            parse_mode: d.format,
            has_spoiler: d.spoiler,
            disable_notification: d.silent,
            protect_content: d.protect,
            attachments,
        })?;
        Ok(())
    }
}

fn message_options(d: &Delivery) -> SendMessageOptions {
    SendMessageOptions {
        chat_id: d.chat_id.clone(),
        message_thread_id: d.thread_id.clone(),
        text: d.message.clone(),
        parse_mode: d.format,
        disable_notification: d.silent,
        protect_content: d.protect,
        disable_link_preview: d.no_link_preview,
    }
}
