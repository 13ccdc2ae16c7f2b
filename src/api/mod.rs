//! Backend client module for HTTP/JSON communication

mod client;
mod traits;

pub use client::{ApiClient, ApiError, DEFAULT_BASE_URL};
pub use traits::BackendClient;

#[cfg(test)]
pub use traits::MockBackendClient;
