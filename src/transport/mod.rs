//! HTTP transport layer.

pub mod http;

pub use http::{HttpClient, RequestOptions};
