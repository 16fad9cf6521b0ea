//! Adapter implementations for the registry ports.

pub mod http;
pub mod memory;
