//! HTTP handlers for the broker view.

pub mod dashboard;
pub mod error;
pub mod extract;

pub use dashboard::get_dashboard;
pub use error::ApiError;
pub use extract::{RequestHost, RequestIdentity, SessionCookie};
