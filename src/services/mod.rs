pub mod dog_api;
pub mod tracing_setup;
