//! Tracing/logging setup shared by stockroom binaries.

pub mod logging;

pub use logging::{LogFormat, init, init_with_format};
