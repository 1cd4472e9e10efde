pub mod cli;
pub mod tracing_setup;
