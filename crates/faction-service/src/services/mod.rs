//! Business logic services
//!
//! The lister resolves a faction roster; the aggregator enriches every member
//! with three statistic snapshots. Both reach the upstream through the
//! [`ServiceContext`].

pub mod aggregator;
pub mod context;
pub mod error;
pub mod lister;
pub mod pacing;

pub use aggregator::StatAggregator;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use lister::MemberLister;
pub use pacing::{FixedInterval, NoPacing, SystemClock};
