//! Parsed Azure resource identifiers
//!
//! A resource identifier has the shape
//! `/subscriptions/{sub}[/resourceGroups/{rg}][/providers/{namespace}/{type}/{name}(/{type}/{name})*]`.
//! The original string is kept for display so that identifiers round-trip
//! unchanged; comparisons are case-insensitive.

use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use super::field::FieldError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("resource ID is empty")]
    Empty,

    #[error("invalid resource ID '{0}': must begin with '/subscriptions/'")]
    MissingSubscription(String),

    #[error("invalid resource ID '{0}': empty path segment")]
    EmptySegment(String),

    #[error("invalid resource ID '{0}': unexpected segment '{1}'")]
    UnexpectedSegment(String, String),

    #[error("invalid resource ID '{0}': resource type '{1}' has no name")]
    MissingName(String, String),
}

/// Coarse classification of a resource identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Subscription,
    ResourceGroup,
    Provider,
}

#[derive(Debug, Clone)]
pub struct ResourceId {
    raw: String,
    subscription_id: String,
    resource_group_name: Option<String>,
    namespace: Option<String>,
    // (type, name) pairs from outermost to innermost
    segments: Vec<(String, String)>,
}

impl ResourceId {
    pub fn parse(s: &str) -> Result<Self, ResourceIdError> {
        let trimmed = s.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ResourceIdError::Empty);
        }

        let parts: Vec<&str> = trimmed.split('/').collect();
        // Leading slash yields an empty first element.
        if parts.len() < 3 || !parts[0].is_empty() || !parts[1].eq_ignore_ascii_case("subscriptions")
        {
            return Err(ResourceIdError::MissingSubscription(s.to_string()));
        }
        if parts[1..].iter().any(|p| p.is_empty()) {
            return Err(ResourceIdError::EmptySegment(s.to_string()));
        }

        let subscription_id = parts[2].to_string();
        let mut resource_group_name = None;
        let mut namespace = None;
        let mut segments = Vec::new();

        let mut rest = &parts[3..];
        if let [keyword, name, tail @ ..] = rest {
            if keyword.eq_ignore_ascii_case("resourceGroups") {
                resource_group_name = Some(name.to_string());
                rest = tail;
            }
        }

        match rest {
            [] => {}
            [keyword, ns, tail @ ..] if keyword.eq_ignore_ascii_case("providers") => {
                namespace = Some(ns.to_string());
                if tail.is_empty() {
                    return Err(ResourceIdError::MissingName(s.to_string(), ns.to_string()));
                }
                for pair in tail.chunks(2) {
                    match pair {
                        [ty, name] => segments.push((ty.to_string(), name.to_string())),
                        _ => {
                            return Err(ResourceIdError::MissingName(
                                s.to_string(),
                                pair.concat(),
                            ))
                        }
                    }
                }
            }
            [other, ..] => {
                return Err(ResourceIdError::UnexpectedSegment(
                    s.to_string(),
                    other.to_string(),
                ))
            }
        }

        Ok(Self {
            raw: trimmed.to_string(),
            subscription_id,
            resource_group_name,
            namespace,
            segments,
        })
    }

    /// Parse a resource identifier, reporting failure as a field error at `target`
    pub fn parse_field(s: &str, target: &str) -> Result<Self, FieldError> {
        Self::parse(s).map_err(|e| FieldError::new(target, e.to_string()))
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group_name(&self) -> Option<&str> {
        self.resource_group_name.as_deref()
    }

    pub fn provider_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn resource_type(&self) -> ResourceType {
        if !self.segments.is_empty() {
            ResourceType::Provider
        } else if self.resource_group_name.is_some() {
            ResourceType::ResourceGroup
        } else {
            ResourceType::Subscription
        }
    }

    /// Resource type without the namespace, e.g. `hcpOpenShiftClusters/nodePools`
    pub fn type_path(&self) -> String {
        match self.resource_type() {
            ResourceType::Subscription => "subscriptions".to_string(),
            ResourceType::ResourceGroup => "resourceGroups".to_string(),
            ResourceType::Provider => self
                .segments
                .iter()
                .map(|(ty, _)| ty.as_str())
                .collect::<Vec<_>>()
                .join("/"),
        }
    }

    /// Fully qualified resource type, e.g. `Microsoft.RedHatOpenShift/hcpOpenShiftClusters`
    pub fn full_type(&self) -> String {
        match (&self.namespace, self.resource_type()) {
            (Some(ns), ResourceType::Provider) => format!("{}/{}", ns, self.type_path()),
            (_, ResourceType::ResourceGroup) => "Microsoft.Resources/resourceGroups".to_string(),
            _ => "Microsoft.Resources/subscriptions".to_string(),
        }
    }

    /// Name of the innermost resource
    pub fn name(&self) -> &str {
        if let Some((_, name)) = self.segments.last() {
            name
        } else if let Some(rg) = &self.resource_group_name {
            rg
        } else {
            &self.subscription_id
        }
    }

    /// The enclosing resource, or `None` for a subscription
    pub fn parent(&self) -> Option<ResourceId> {
        let mut parent = self.clone();
        if parent.segments.pop().is_some() {
            if parent.segments.is_empty() {
                parent.namespace = None;
            }
        } else if parent.resource_group_name.take().is_none() {
            return None;
        }
        parent.raw = parent.render();
        Some(parent)
    }

    fn render(&self) -> String {
        let mut out = format!("/subscriptions/{}", self.subscription_id);
        if let Some(rg) = &self.resource_group_name {
            out.push_str("/resourceGroups/");
            out.push_str(rg);
        }
        if let Some(ns) = &self.namespace {
            out.push_str("/providers/");
            out.push_str(ns);
            for (ty, name) in &self.segments {
                out.push('/');
                out.push_str(ty);
                out.push('/');
                out.push_str(name);
            }
        }
        out
    }
}

/// Stringify an optional identifier, `None` becoming the empty string
pub fn resource_id_to_string(id: Option<&ResourceId>) -> String {
    id.map(ToString::to_string).unwrap_or_default()
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.raw.eq_ignore_ascii_case(&other.raw)
    }
}

impl Eq for ResourceId {}

impl Hash for ResourceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.to_ascii_lowercase().hash(state);
    }
}

impl serde::Serialize for ResourceId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> serde::Deserialize<'de> for ResourceId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "resource_id_test.rs"]
mod tests;
