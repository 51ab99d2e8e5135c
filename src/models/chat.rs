use serde::{ Serialize, Deserialize };
use std::fmt;
use std::sync::atomic::{ AtomicU64, Ordering };

use crate::linkify::escape_html;

/// Body of `POST /ask`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Successful reply from `/ask`. `answer` may be plain text or markup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable handle for a loading placeholder, unique within a process.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceholderId(String);

static PLACEHOLDER_SEQ: AtomicU64 = AtomicU64::new(0);

impl PlaceholderId {
    /// Timestamp-based token; the sequence suffix keeps two submissions in the
    /// same millisecond apart.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = PLACEHOLDER_SEQ.fetch_add(1, Ordering::Relaxed);
        PlaceholderId(format!("loading-{}-{}", millis, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MessageBody {
    /// Rendered as text; never interpreted as markup.
    Text(String),
    /// Inserted into the page verbatim.
    Markup(String),
}

impl MessageBody {
    pub fn raw(&self) -> &str {
        match self {
            MessageBody::Text(s) | MessageBody::Markup(s) => s,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            MessageBody::Text(s) => escape_html(s),
            MessageBody::Markup(s) => s.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageNode {
    pub sender: Sender,
    pub body: MessageBody,
    pub placeholder_id: Option<PlaceholderId>,
}

impl MessageNode {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            body: MessageBody::Text(text.into()),
            placeholder_id: None,
        }
    }

    pub fn bot(body: MessageBody) -> Self {
        Self {
            sender: Sender::Bot,
            body,
            placeholder_id: None,
        }
    }

    pub fn loading(text: impl Into<String>, id: PlaceholderId) -> Self {
        Self {
            sender: Sender::Bot,
            body: MessageBody::Text(text.into()),
            placeholder_id: Some(id),
        }
    }

    pub fn is_loading_placeholder(&self) -> bool {
        self.placeholder_id.is_some()
    }

    /// `<div class="message bot-message loading-message" id="...">...</div>`
    pub fn to_html(&self) -> String {
        let mut classes = format!("message {}-message", self.sender);
        let mut id_attr = String::new();
        if let Some(id) = &self.placeholder_id {
            classes.push_str(" loading-message");
            id_attr = format!(" id=\"{}\"", escape_html(id.as_str()));
        }
        format!("<div class=\"{}\"{}>{}</div>", classes, id_attr, self.body.to_html())
    }
}
