//! Shared utilities: Arrow conversions, table I/O and logging helpers

pub mod arrow_utils;
pub mod io;
pub mod logging;
