use std::{fmt, str::FromStr};

use crate::errors::Error;

/// Message text format selected by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    Html,
}

impl ParseMode {
    /// Value sent as `parse_mode` on the wire.
    ///
    /// Telegram's legacy `Markdown` mode is deprecated, so markdown input is sent as `MarkdownV2`.
    pub fn wire_value(self) -> &'static str {
        match self {
            ParseMode::Markdown => "MarkdownV2",
            ParseMode::Html => "html",
        }
    }
}

impl FromStr for ParseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" => Ok(ParseMode::Markdown),
            "html" => Ok(ParseMode::Html),
            other => Err(Error::Usage(format!(
                "incorrect value for --format flag: {other:?} (possible values: markdown, html)"
            ))),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Markdown => f.write_str("markdown"),
            ParseMode::Html => f.write_str("html"),
        }
    }
}
