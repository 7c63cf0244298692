//! Service layer: the assessment and drafting contracts the workflow drives,
//! plus an HTTP transport for the hosted service.

mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

pub use error::ServiceError;
pub use service::RfpService;

#[cfg(feature = "http")]
pub use http::HttpRfpService;
