pub mod cors;
pub mod metrics;
pub mod tracing;

pub use self::cors::cors_middleware;
pub use self::metrics::metrics_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, make_request_span};
