//! Logging utilities.
//!
//! Everything in the engine logs through the `log` facade; this module only
//! owns backend initialization. Dropped protocol events are reported at
//! `debug`, backend failover at `info`/`error`.

mod init;

pub use init::{init_logging, LoggingConfig};
