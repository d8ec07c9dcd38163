use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{zero_date, Announcement};

/// Request body for create and update.
///
/// Fields left out of the JSON take their zero value; `_id` and any other
/// unknown keys are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnnouncementPayload {
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl Default for AnnouncementPayload {
    fn default() -> Self {
        Self {
            is_active: false,
            title: String::new(),
            content: String::new(),
            date: zero_date(),
        }
    }
}

impl AnnouncementPayload {
    /// Decodes the first JSON value in `body`.
    ///
    /// Anything after that value is left unread, and a literal `null` yields
    /// the zero payload. An empty body is an error.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();
        match values.next() {
            Some(Ok(payload)) => Ok(payload.unwrap_or_default()),
            Some(Err(e)) => Err(e),
            None => Err(serde::de::Error::custom("EOF")),
        }
    }
}

impl From<AnnouncementPayload> for Announcement {
    fn from(payload: AnnouncementPayload) -> Self {
        Announcement::new(
            payload.is_active,
            payload.title,
            payload.content,
            payload.date,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementResponse {
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(announcement: Announcement) -> Self {
        Self {
            is_active: announcement.is_active,
            id: announcement.id.map(|id| id.to_hex()),
            title: announcement.title,
            content: announcement.content,
            date: announcement.date,
        }
    }
}
