//! Utilities shared by the Genkan packages.

pub mod logger;
pub mod time;
