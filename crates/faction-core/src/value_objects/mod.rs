//! Value objects - immutable types that represent domain concepts

mod credentials;
mod upstream_request;

pub use credentials::{ApiKey, FactionId};
pub use upstream_request::UpstreamRequest;
