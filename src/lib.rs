//! Realty Membership - trust scoring and tier classification for the
//! real-estate marketplace.
//!
//! This crate turns a flat snapshot of a user's verification, activity and
//! tenure signals into a bounded trust score, a membership tier, an
//! experience tier and a report of what is still missing for the next tier.

pub mod config;
pub mod domain;
pub mod telemetry;
