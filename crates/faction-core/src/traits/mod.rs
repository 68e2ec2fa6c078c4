//! Ports - interfaces the domain needs from infrastructure

mod ports;

pub use ports::{Clock, PacingStrategy, UpstreamClient, UpstreamResult};
