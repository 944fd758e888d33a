//! End-to-End Integration Tests
//!
//! These tests drive the SAML codec through its public API only: raw XML
//! in, typed messages out, and back again.

mod common;
mod dispatch;
mod factory;
mod metadata;
mod round_trip;
