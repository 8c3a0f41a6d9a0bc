pub mod api;
pub mod cli;
pub mod commands;
mod logging;

pub use logging::init_tracing;
