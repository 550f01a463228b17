//! Library side of the `edq` command: logging setup and the clean command.

pub mod commands;
pub mod logging;
pub mod types;
