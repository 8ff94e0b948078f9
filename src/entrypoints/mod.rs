// Shared modules
pub(crate) mod cli;
pub(crate) mod logging;

// Entry points
pub mod main;
