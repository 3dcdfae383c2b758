//! API handlers
//!
//! Handlers read the shared [`crate::AppState`], never fetch from the
//! exchange themselves (except `refresh`, which only starts a background
//! run), and wrap results in the standardized response types.

pub mod dashboard;
pub mod response;

pub use response::{ApiListResponse, ApiResponse};
