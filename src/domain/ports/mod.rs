pub mod cache;
pub mod role_repository;
pub mod user_role_repository;

pub use cache::*;
pub use role_repository::*;
pub use user_role_repository::*;
