//! HTTP access to the StudyPulse API.

pub mod client;
pub mod dto;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ApiClient, RequestOptions};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, HttpTransport};
