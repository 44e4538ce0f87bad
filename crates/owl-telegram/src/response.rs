use serde::Deserialize;

use owl_core::{Error, Result};

/// Placeholder used when an error response has no body at all.
pub const EMPTY_BODY_MARKER: &str = "<empty response body>";

/// Bot API response envelope: `{ ok, error_code?, description? }`.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    description: String,
}

/// What a Bot API response amounts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiOutcome {
    Success,
    /// The API explained itself with a code and description.
    ApiError { code: i64, description: String },
    /// Anything else: raw body, or [`EMPTY_BODY_MARKER`].
    Unexpected { body: String },
}

impl ApiOutcome {
    pub fn classify(status: u16, body: &str) -> Self {
        let envelope = serde_json::from_str::<Envelope>(body).ok();

        let success_status = (200..300).contains(&status);
        if success_status && envelope.as_ref().is_some_and(|e| e.ok) {
            return ApiOutcome::Success;
        }

        if let Some(e) = envelope.filter(|e| !e.description.is_empty()) {
            return ApiOutcome::ApiError {
                code: e.error_code,
                description: e.description,
            };
        }

        let body = if body.trim().is_empty() {
            EMPTY_BODY_MARKER.to_string()
        } else {
            body.to_string()
        };
        ApiOutcome::Unexpected { body }
    }

    pub fn into_result(self, endpoint: &str, status: u16) -> Result<()> {
        match self {
            ApiOutcome::Success => Ok(()),
            ApiOutcome::ApiError { code, description } => Err(Error::Api {
                endpoint: endpoint.to_string(),
                status,
                code,
                description,
            }),
            ApiOutcome::Unexpected { body } => Err(Error::UnexpectedResponse { status, body }),
        }
    }
}
