//! Hygro - humidity station control plane
//!
//! Samples a humidity sensor, drives the local indicators and serves a
//! dashboard with a single LED toggle over HTTP.

pub mod config;
pub mod device;
pub mod http;
pub mod server;
pub mod state;
