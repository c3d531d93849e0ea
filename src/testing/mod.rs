//! Test support for geopulse
//!
//! Provides:
//! - Payload builders shaped like each upstream source
//! - A transport preloaded with healthy routes for every source

pub mod fixtures;

pub use fixtures::healthy_transport;
