use crate::context::Message;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>, total: i64) -> Self {
        List { list, total }
    }
}

/// Body of every rendered page: the page content plus the flash messages
/// that were waiting for this client.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(flatten)]
    pub content: T,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Landing {
    pub name: &'static str,
    pub version: &'static str,
    pub polls: &'static str,
    pub health: &'static str,
}
