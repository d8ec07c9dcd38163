pub mod database;
pub mod memory;
pub mod query;
pub mod store;

pub use database::MongoAnnouncementStore;
pub use memory::InMemoryAnnouncementStore;
pub use query::Filter;
pub use store::{AnnouncementStore, StoreError};
