/// Canonical (action, resource) pair an endpoint maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointMapping {
    pub action: &'static str,
    pub resource: &'static str,
}

/// Gateway endpoint rules, checked in declaration order; first matching
/// prefix wins. Prefixes are deliberately broad: "GET /users" also covers
/// "GET /users/123".
const ENDPOINT_RULES: &[(&str, EndpointMapping)] = &[
    // User APIs
    ("GET /users", EndpointMapping { action: "view", resource: "user_basic_info" }),
    ("POST /users", EndpointMapping { action: "execute", resource: "create_user" }),
    ("PATCH /users/", EndpointMapping { action: "edit", resource: "user_basic_info" }),
    ("PUT /users/", EndpointMapping { action: "edit", resource: "user_basic_info" }),
    ("DELETE /users/", EndpointMapping { action: "execute", resource: "delete_user" }),
    // Task APIs
    ("GET /tasks", EndpointMapping { action: "view", resource: "task" }),
    ("POST /tasks", EndpointMapping { action: "execute", resource: "create_task" }),
    ("PUT /tasks/", EndpointMapping { action: "edit", resource: "task" }),
    ("PATCH /tasks/", EndpointMapping { action: "edit", resource: "task" }),
    ("DELETE /tasks/", EndpointMapping { action: "execute", resource: "delete_task" }),
    // Organization APIs
    ("GET /organization", EndpointMapping { action: "view", resource: "organization" }),
    ("PUT /organization", EndpointMapping { action: "edit", resource: "organization" }),
    ("PATCH /organization", EndpointMapping { action: "edit", resource: "organization" }),
    // Client APIs
    ("GET /clients", EndpointMapping { action: "view", resource: "client" }),
    ("POST /clients", EndpointMapping { action: "execute", resource: "create_client" }),
    ("PUT /clients/", EndpointMapping { action: "edit", resource: "client" }),
    ("PATCH /clients/", EndpointMapping { action: "edit", resource: "client" }),
    ("DELETE /clients/", EndpointMapping { action: "execute", resource: "delete_client" }),
    // Comment APIs
    ("GET /comment", EndpointMapping { action: "view", resource: "comment" }),
    ("POST /comment", EndpointMapping { action: "execute", resource: "create_comment" }),
    ("PUT /comment/", EndpointMapping { action: "edit", resource: "comment" }),
    ("PATCH /comment/", EndpointMapping { action: "edit", resource: "comment" }),
    ("DELETE /comment/", EndpointMapping { action: "execute", resource: "delete_comment" }),
];

/// Map an `"<HTTP-VERB> <path>"` string to its (action, resource) pair.
/// Pure prefix matching, case-sensitive. Unknown endpoints map to `None`,
/// which callers must treat as deny.
pub fn map_endpoint(endpoint: &str) -> Option<EndpointMapping> {
    ENDPOINT_RULES
        .iter()
        .find(|(prefix, _)| endpoint.starts_with(prefix))
        .map(|(_, mapping)| *mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_endpoints() {
        assert_eq!(
            map_endpoint("GET /users"),
            Some(EndpointMapping { action: "view", resource: "user_basic_info" })
        );
        assert_eq!(
            map_endpoint("POST /users"),
            Some(EndpointMapping { action: "execute", resource: "create_user" })
        );
        assert_eq!(
            map_endpoint("PATCH /users/abc-123"),
            Some(EndpointMapping { action: "edit", resource: "user_basic_info" })
        );
        assert_eq!(
            map_endpoint("DELETE /users/abc-123"),
            Some(EndpointMapping { action: "execute", resource: "delete_user" })
        );
    }

    #[test]
    fn test_task_and_client_endpoints() {
        assert_eq!(
            map_endpoint("GET /tasks"),
            Some(EndpointMapping { action: "view", resource: "task" })
        );
        assert_eq!(
            map_endpoint("PUT /tasks/42"),
            Some(EndpointMapping { action: "edit", resource: "task" })
        );
        assert_eq!(
            map_endpoint("DELETE /clients/42"),
            Some(EndpointMapping { action: "execute", resource: "delete_client" })
        );
    }

    #[test]
    fn test_organization_and_comment_endpoints() {
        assert_eq!(
            map_endpoint("GET /organization"),
            Some(EndpointMapping { action: "view", resource: "organization" })
        );
        assert_eq!(
            map_endpoint("PATCH /organization"),
            Some(EndpointMapping { action: "edit", resource: "organization" })
        );
        assert_eq!(
            map_endpoint("POST /comment"),
            Some(EndpointMapping { action: "execute", resource: "create_comment" })
        );
    }

    #[test]
    fn test_broad_prefix_matches_subpaths() {
        // "GET /users" covers the detail route too; first rule wins.
        assert_eq!(
            map_endpoint("GET /users/abc-123"),
            Some(EndpointMapping { action: "view", resource: "user_basic_info" })
        );
    }

    #[test]
    fn test_unknown_endpoints_have_no_mapping() {
        assert_eq!(map_endpoint("GET /unknown"), None);
        assert_eq!(map_endpoint("DELETE /organization"), None);
        assert_eq!(map_endpoint(""), None);
        // Verb match is case-sensitive.
        assert_eq!(map_endpoint("get /users"), None);
    }
}
