pub mod error;
pub mod identity;

pub use error::*;
pub use identity::*;
