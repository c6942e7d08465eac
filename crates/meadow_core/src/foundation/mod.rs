//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the runtime:
//! - Math types and projections
//! - Frame timing
//! - Logging setup

pub mod logging;
pub mod math;
pub mod time;
