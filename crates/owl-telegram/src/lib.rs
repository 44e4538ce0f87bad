//! Telegram Bot API adapter (reqwest, blocking).
//!
//! Implements the `owl-core` [`BotApi`] port over HTTP and bundles the method
//! senders into a [`Client`].

pub mod http;
pub mod response;

use std::sync::Arc;

use owl_core::{
    methods::{MediaGroupSender, MessageSender},
    ports::BotApi,
    Result,
};

pub use http::HttpClient;
pub use response::{ApiOutcome, EMPTY_BODY_MARKER};

/// Bot API methods used by telegram-owl, sharing one HTTP client.
#[derive(Clone)]
pub struct Client {
    pub send_message: MessageSender,
    pub send_media_group: MediaGroupSender,
}

impl Client {
    pub fn new(api_base_url: &str, token: &str, proxy: Option<&str>) -> Result<Self> {
        let http = HttpClient::new(api_base_url, token, proxy)?;
        Ok(Self::with_api(Arc::new(http)))
    }

    pub fn with_api(api: Arc<dyn BotApi>) -> Self {
        Self {
            send_message: MessageSender::new(Arc::clone(&api)),
            send_media_group: MediaGroupSender::new(api),
        }
    }
}
