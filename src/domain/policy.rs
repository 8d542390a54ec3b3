use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Section of a policy document a permission lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySection {
    Data,
    Features,
}

/// Allow-list policy attached to a role.
///
/// Two sections, each mapping an action ("view", "edit", "execute") to the
/// resources it is allowed on. A missing section or action simply grants
/// nothing. Matching is exact string equality; a stored `"*"` entry only
/// matches a literal `"*"` resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDocument {
    #[serde(default)]
    pub data: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub features: HashMap<String, Vec<String>>,
}

impl PolicyDocument {
    /// Parse a policy from its stored JSON text. Used at role creation and
    /// update time, where a malformed document is a caller error.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.trim().is_empty() || raw.trim() == "null" {
            return Err(DomainError::Validation("Policy cannot be null".to_string()));
        }
        serde_json::from_str(raw)
            .map_err(|e| DomainError::Validation(format!("Invalid policy JSON: {}", e)))
    }

    /// Parse a policy already held as a JSON value.
    pub fn from_value(value: &serde_json::Value) -> DomainResult<Self> {
        if value.is_null() {
            return Err(DomainError::Validation("Policy cannot be null".to_string()));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::Validation(format!("Invalid policy JSON: {}", e)))
    }

    fn section(&self, section: PolicySection) -> &HashMap<String, Vec<String>> {
        match section {
            PolicySection::Data => &self.data,
            PolicySection::Features => &self.features,
        }
    }

    /// True iff the given section maps `action` to a list containing an
    /// entry textually equal to `resource`.
    pub fn allows(&self, section: PolicySection, action: &str, resource: &str) -> bool {
        self.section(section)
            .get(action)
            .map(|resources| resources.iter().any(|r| r == resource))
            .unwrap_or(false)
    }

    /// Check both sections in order: data first, then features.
    pub fn grants(&self, action: &str, resource: &str) -> bool {
        self.allows(PolicySection::Data, action, resource)
            || self.allows(PolicySection::Features, action, resource)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
