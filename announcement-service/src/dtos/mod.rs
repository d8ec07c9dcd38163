pub mod announcements;

pub use announcements::{AnnouncementPayload, AnnouncementResponse};
