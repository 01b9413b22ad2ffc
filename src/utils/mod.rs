//! The `utils` module collects shared plumbing used across the relay:
//! error types and logging setup.

pub mod error;
pub mod logging;
