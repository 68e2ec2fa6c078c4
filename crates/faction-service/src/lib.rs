//! # faction-service
//!
//! Application layer containing the member lister, the stat aggregator, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    FixedInterval, MemberLister, NoPacing, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, StatAggregator, SystemClock,
};
