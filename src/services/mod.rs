pub mod memory_cache;
pub mod permission_service;
pub mod role_service;
pub mod user_role_service;

pub use memory_cache::*;
pub use permission_service::*;
pub use role_service::*;
pub use user_role_service::*;
