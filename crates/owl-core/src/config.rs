use std::env;

use crate::{attachment::BYTES_PER_MEGABYTE, errors::Error, Result};

/// Public Bot API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Limits applied while loading attachments.
///
/// Defaults follow the Bot API upload limits for bots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttachmentLimits {
    pub max_attachments: usize,
    /// Photos above this are sent as documents instead of being rejected.
    pub max_photo_bytes: u64,
    pub max_attachment_bytes: u64,
    pub max_total_bytes: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_attachments: 10,
            max_photo_bytes: 10 * BYTES_PER_MEGABYTE,
            max_attachment_bytes: 50 * BYTES_PER_MEGABYTE,
            max_total_bytes: 50 * BYTES_PER_MEGABYTE,
        }
    }
}

impl AttachmentLimits {
    /// Defaults, overridable through `TELEGRAM_OWL_MAX_*` env vars (useful with a
    /// self-hosted Bot API server, which allows larger uploads).
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            max_attachments: env_usize("TELEGRAM_OWL_MAX_ATTACHMENTS").unwrap_or(d.max_attachments),
            max_photo_bytes: env_megabytes("TELEGRAM_OWL_MAX_PHOTO_MB").unwrap_or(d.max_photo_bytes),
            max_attachment_bytes: env_megabytes("TELEGRAM_OWL_MAX_ATTACHMENT_MB")
                .unwrap_or(d.max_attachment_bytes),
            max_total_bytes: env_megabytes("TELEGRAM_OWL_MAX_TOTAL_MB")
                .unwrap_or(d.max_total_bytes),
        }
    }
}

/// Everything needed to deliver one message.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub token: String,
    pub chat_id: String,
    pub proxy: Option<String>,
    pub thread_id: Option<String>,
    pub limits: AttachmentLimits,
}

impl Config {
    pub fn new(
        api_base_url: impl Into<String>,
        token: Option<String>,
        chat_id: Option<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            token: token.map(|t| t.trim().to_string()).unwrap_or_default(),
            chat_id: chat_id.map(|c| c.trim().to_string()).unwrap_or_default(),
            proxy: None,
            thread_id: None,
            limits: AttachmentLimits::default(),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.and_then(non_empty);
        self
    }

    pub fn with_thread_id(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id.and_then(non_empty);
        self
    }

    pub fn with_limits(mut self, limits: AttachmentLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Check the required values; the first missing one wins.
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::Config(missing_flag(
                "token",
                "TELEGRAM_OWL_TOKEN",
                "telegram-owl --token=123:ABC",
            )));
        }
        if self.chat_id.is_empty() {
            return Err(Error::Config(missing_flag(
                "chat",
                "TELEGRAM_OWL_CHAT",
                "telegram-owl --chat=31337",
            )));
        }
        Ok(())
    }
}

fn missing_flag(flag: &str, env_var: &str, example: &str) -> String {
    format!(
        "missing required flag: --{flag}\n\
Set it via the --{flag} flag or the {env_var} environment variable.\n\
\n\
Example:\n  {example}\n\
\n\
Run with --help to see all options."
    )
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn env_megabytes(key: &str) -> Option<u64> {
    env_str(key)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|mb| mb.saturating_mul(BYTES_PER_MEGABYTE))
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
