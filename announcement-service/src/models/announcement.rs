use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted form of an announcement.
///
/// `id` is assigned by the store on insert and never changes afterwards.
/// Fields missing from a stored document decode to their zero values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Announcement {
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

/// Zero value for `date`: `0001-01-01T00:00:00Z`.
pub fn zero_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Default for Announcement {
    fn default() -> Self {
        Self::new(false, String::new(), String::new(), zero_date())
    }
}

impl Announcement {
    pub fn new(is_active: bool, title: String, content: String, date: DateTime<Utc>) -> Self {
        Self {
            is_active,
            id: None,
            title,
            content,
            date,
        }
    }

    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}
