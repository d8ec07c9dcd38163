pub mod announcement;

pub use announcement::{zero_date, Announcement};
