//! Logger initialization.
//!
//! Every crate logs through the `log` facade; only the binary calls
//! [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
