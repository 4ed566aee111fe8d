//! View service boundary: the remote procedure operations the client composes over.

pub mod config;
pub mod proto;
pub mod service;

#[cfg(feature = "http")]
pub mod http;

pub use config::ServiceConfig;
pub use service::{ServiceError, ViewService};

#[cfg(feature = "http")]
pub use http::HttpViewClient;
