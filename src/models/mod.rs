pub mod role;
pub mod user_role;

pub use role::*;
pub use user_role::*;

pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap()
}
