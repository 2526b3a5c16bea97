//! Command handlers -- one module per subcommand

pub mod analyze;
pub mod colors;
pub mod config;
