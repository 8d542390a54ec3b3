pub mod endpoint;
pub mod errors;
pub mod policy;
pub mod ports;
