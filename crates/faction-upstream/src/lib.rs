//! # faction-upstream
//!
//! HTTP implementation of the upstream port. This is the only crate that
//! talks to the network; timeouts, the client agent header, and error
//! normalization live here.

pub mod client;

pub use client::HttpUpstreamClient;
