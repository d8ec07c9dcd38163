//! HTTP handlers for announcement-service.

pub mod announcements;
pub mod health;

pub use announcements::{
    create_announcement, delete_announcement, get_announcement, list_announcements,
    update_announcement, AnnouncementId, ANNOUNCEMENTS_PATH,
};
pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
