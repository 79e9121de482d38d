//! Handler implementations
//!
//! Contains LogHandler.

mod log;

pub use self::log::LogHandler;
