//! Bot API methods: option validation, payload composition, submission.
//!
//! Each method validates its options all at once (every violation is reported,
//! not just the first), turns them into a transport-neutral payload and hands
//! that to a [`BotApi`](crate::ports::BotApi).

pub mod send_media_group;
pub mod send_message;

#[cfg(test)]
pub(crate) mod testing;

pub use send_media_group::{MediaGroupSender, SendMediaGroupOptions};
pub use send_message::{MessageSender, SendMessageOptions};

use crate::{errors::Error, Result};

/// Shared ceiling for message text and media captions.
pub const MAX_TEXT_LENGTH: usize = 4096;

/// Collects validation failures so they can be reported together.
#[derive(Debug, Default)]
struct Violations(Vec<String>);

impl Violations {
    fn check(&mut self, ok: bool, msg: impl FnOnce() -> String) {
        if !ok {
            self.0.push(msg());
        }
    }

    fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.0.join("; ")))
        }
    }
}

fn too_long(len: usize) -> String {
    format!("message is too long: must be <= {MAX_TEXT_LENGTH} characters, got {len}")
}

fn is_false(b: &bool) -> bool {
    !*b
}
