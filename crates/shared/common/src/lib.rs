//! Common utilities shared across the gateway crates.
//!
//! This crate provides:
//! - The gateway error taxonomy
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{BoxError, ErrorKind, GatewayError, GatewayResult, OptionExt};
