use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

use crate::dtos::{AnnouncementPayload, AnnouncementResponse};
use crate::startup::AppState;

pub const ANNOUNCEMENTS_PATH: &str = "/api/announcements";
const ANNOUNCEMENT_ID_PREFIX: &str = "/api/announcements/";

/// Announcement id taken from everything after `/api/announcements/`.
///
/// An empty remainder, extra path segments or anything that is not a
/// 24-digit hex `ObjectId` is rejected with 400.
#[derive(Debug, Clone, Copy)]
pub struct AnnouncementId(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for AnnouncementId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_announcement_id(parts.uri.path()).map(AnnouncementId)
    }
}

pub fn parse_announcement_id(path: &str) -> Result<ObjectId, AppError> {
    let raw = path.strip_prefix(ANNOUNCEMENT_ID_PREFIX).unwrap_or(path);
    ObjectId::parse_str(raw).map_err(|e| {
        tracing::debug!(raw_id = %raw, "Rejected malformed announcement id");
        AppError::BadRequest(anyhow::anyhow!("{}", e))
    })
}

fn decode_payload(body: &[u8]) -> Result<AnnouncementPayload, AppError> {
    AnnouncementPayload::from_json(body).map_err(|e| {
        tracing::debug!("Rejected announcement body: {}", e);
        AppError::BadRequest(anyhow::anyhow!("{}", e))
    })
}

#[tracing::instrument(skip(state))]
pub async fn get_announcement(
    State(state): State<AppState>,
    id: AnnouncementId,
) -> Result<Json<AnnouncementResponse>, AppError> {
    let announcement = state.store.find_one(id.0).await?;
    Ok(Json(announcement.into()))
}

#[tracing::instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnnouncementResponse>>, AppError> {
    let announcements = state.store.find_all().await?;
    tracing::debug!(count = announcements.len(), "Listed announcements");
    Ok(Json(
        announcements
            .into_iter()
            .map(AnnouncementResponse::from)
            .collect(),
    ))
}

/// The body is decoded regardless of `Content-Type`; any decode failure is a 400.
#[tracing::instrument(skip(state, body))]
pub async fn create_announcement(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<String, AppError> {
    let payload = decode_payload(&body)?;
    let id = state.store.insert_one(payload.into()).await?;

    tracing::info!(id = %id, "Announcement created");
    Ok(format!("Inserted document with ID: {}", id.to_hex()))
}

/// Succeeds even when no announcement has `id`.
#[tracing::instrument(skip(state, body))]
pub async fn update_announcement(
    State(state): State<AppState>,
    id: AnnouncementId,
    body: Bytes,
) -> Result<String, AppError> {
    let payload = decode_payload(&body)?;
    state.store.update_one(id.0, payload.into()).await?;

    tracing::info!(id = %id.0, "Announcement updated");
    Ok(format!("Updated document with ID: {}", id.0.to_hex()))
}

/// Succeeds even when no announcement has `id`.
#[tracing::instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    id: AnnouncementId,
) -> Result<String, AppError> {
    state.store.delete_one(id.0).await?;

    tracing::info!(id = %id.0, "Announcement deleted");
    Ok(format!("Deleted document with ID: {}", id.0.to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_id_after_prefix() {
        let id = parse_announcement_id("/api/announcements/65a1b2c3d4e5f6a7b8c9d0e1").unwrap();
        assert_eq!(id.to_hex(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn rejects_malformed_ids() {
        for path in [
            "/api/announcements/",
            "/api/announcements/not-an-id",
            "/api/announcements/65a1b2c3d4e5f6a7b8c9d0",
            "/api/announcements/65a1b2c3d4e5f6a7b8c9d0e1/extra",
            "/api/announcements/zza1b2c3d4e5f6a7b8c9d0e1",
        ] {
            assert!(
                matches!(parse_announcement_id(path), Err(AppError::BadRequest(_))),
                "expected 400 for {}",
                path
            );
        }
    }

    #[test]
    fn body_decode_errors_are_bad_requests() {
        assert!(matches!(
            decode_payload(b"{\"title\": 42}"),
            Err(AppError::BadRequest(_))
        ));
        assert!(decode_payload(b"{}").is_ok());
    }
}
