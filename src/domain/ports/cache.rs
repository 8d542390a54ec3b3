use std::time::Duration;

/// Cache namespaces and their entry TTLs.
pub const NS_ROLES: &str = "roles";
pub const NS_USER_ROLES: &str = "user_roles";
pub const NS_PERMISSIONS: &str = "permissions";

pub const ROLES_TTL: Duration = Duration::from_secs(5 * 60);
pub const USER_ROLES_TTL: Duration = Duration::from_secs(5 * 60);
pub const PERMISSIONS_TTL: Duration = Duration::from_secs(60);

/// Best-effort read-through cache shared by the services.
///
/// Entries are JSON values keyed by (namespace, key). Invalidation is
/// per-namespace only: any role or assignment mutation evicts whole
/// namespaces rather than computing the affected key fan-out. Storage stays
/// the source of truth; a stale read after an eviction must not happen, a
/// miss always may.
pub trait PermissionCache: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<serde_json::Value>;
    fn put(&self, namespace: &str, key: &str, value: serde_json::Value, ttl: Duration);
    fn invalidate_all(&self, namespace: &str);
}
