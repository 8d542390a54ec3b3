pub mod rbac_helpers;
pub mod test_db;
