//! CLI command implementations.

pub mod classify;
pub mod common;
pub mod demo;
pub mod gates;
pub mod search;
pub mod version;
pub mod watch;
