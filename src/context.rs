use crate::error::Error;
use actix_web::cookie::{time::Duration, Cookie};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

pub const MESSAGES_COOKIE: &str = "messages";

/// Upper bound on the queue a redirect carries forward; older messages go first.
pub const MAX_QUEUED_MESSAGES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// Per-request context handed to every page handler. Holds the flash
/// messages an earlier response queued for this client.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pending: Vec<Message>,
}

impl Context {
    pub fn new(pending: Vec<Message>) -> Self {
        Self { pending }
    }

    pub fn pending(&self) -> &[Message] {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take(self) -> Vec<Message> {
        self.pending
    }

    /// Appends `message` to the pending queue for the next page, keeping
    /// only the newest `MAX_QUEUED_MESSAGES`.
    pub fn carry_forward(self, message: Message) -> Vec<Message> {
        let mut queued = self.pending;
        queued.push(message);
        let excess = queued.len().saturating_sub(MAX_QUEUED_MESSAGES);
        queued.drain(..excess);
        queued
    }
}

impl FromRequest for Context {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let pending = req.cookie(MESSAGES_COOKIE).map(|c| decode(c.value())).unwrap_or_default();
        ready(Ok(Context::new(pending)))
    }
}

pub fn encode(messages: &[Message]) -> Result<String, Error> {
    Ok(hex::encode(serde_json::to_vec(messages)?))
}

/// A cookie that does not decode is dropped rather than rejected.
pub fn decode(value: &str) -> Vec<Message> {
    match hex::decode(value).ok().and_then(|raw| serde_json::from_slice(&raw).ok()) {
        Some(messages) => messages,
        None => {
            log::debug!("discarding malformed {} cookie", MESSAGES_COOKIE);
            Vec::new()
        }
    }
}

pub fn queue_cookie(messages: &[Message]) -> Result<Cookie<'static>, Error> {
    Ok(Cookie::build(MESSAGES_COOKIE, encode(messages)?).path("/").http_only(true).finish())
}

pub fn clear_cookie() -> Cookie<'static> {
    Cookie::build(MESSAGES_COOKIE, "").path("/").http_only(true).max_age(Duration::ZERO).finish()
}

#[cfg(test)]
mod test {
    use super::{decode, encode, Context, Level, Message, MAX_QUEUED_MESSAGES};

    #[test]
    fn test_cookie_value_is_token_safe() {
        let value = encode(&[Message::success("Your vote for 'Rust; \"C\"' has been recorded!")]).unwrap();
        assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
        let decoded = decode(&value);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].level, Level::Success);
        assert_eq!(decoded[0].text, "Your vote for 'Rust; \"C\"' has been recorded!");
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode("not hex").is_empty());
        assert!(decode(&hex::encode("{\"level\":")).is_empty());
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_carry_forward_keeps_newest() {
        let ctx = Context::new(vec![Message::error("old")]);
        assert_eq!(ctx.carry_forward(Message::success("new")), vec![Message::error("old"), Message::success("new")]);

        let pending = (0..12).map(|i| Message::success(format!("vote {}", i))).collect();
        let queued = Context::new(pending).carry_forward(Message::success("latest"));
        assert_eq!(queued.len(), MAX_QUEUED_MESSAGES);
        assert_eq!(queued[0].text, "vote 8");
        assert_eq!(queued[MAX_QUEUED_MESSAGES - 1].text, "latest");
    }
}
