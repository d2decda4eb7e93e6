// Open-interest snapshot model
pub mod market;

// Filter / chunk / aggregate transforms
pub mod analytics;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
