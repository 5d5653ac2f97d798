use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;
use thiserror::Error;

/// Separator between the segments of a fully-qualified resource type name.
pub const FQ_NAME_SEPARATOR: char = ':';

/// Identifies a resource type as a `provider:group:resource` triple.
///
/// Cloning is cheap: the segments are reference-counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceDefRef {
    provider: Arc<str>,
    group: Arc<str>,
    resource: Arc<str>,
}

/// A resource type name that does not have the `provider:group:resource` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid resource type '{fq_name}': expected 'provider:group:resource'")]
pub struct ParseRefError {
    pub fq_name: String,
}

impl ResourceDefRef {
    #[must_use]
    pub fn new(provider: impl AsRef<str>, group: impl AsRef<str>, resource: impl AsRef<str>) -> Self {
        Self {
            provider: Arc::from(provider.as_ref()),
            group: Arc::from(group.as_ref()),
            resource: Arc::from(resource.as_ref()),
        }
    }

    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The canonical `provider:group:resource` form
    #[must_use]
    pub fn fq_name(&self) -> String {
        self.to_string()
    }

    /// The `group:resource` part, which is unique within a single provider
    #[must_use]
    pub fn local_name(&self) -> String {
        format!("{}{FQ_NAME_SEPARATOR}{}", self.group, self.resource)
    }
}

impl FromStr for ResourceDefRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, ParseRefError> {
        let mut parts = s.split(FQ_NAME_SEPARATOR).map(str::trim);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(provider), Some(group), Some(resource), None)
                if !provider.is_empty() && !group.is_empty() && !resource.is_empty() =>
            {
                Ok(Self::new(provider, group, resource))
            }
            _ => Err(ParseRefError { fq_name: s.to_string() }),
        }
    }
}

impl Display for ResourceDefRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}{FQ_NAME_SEPARATOR}{}{FQ_NAME_SEPARATOR}{}",
            self.provider, self.group, self.resource
        )
    }
}

impl Serialize for ResourceDefRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ResourceDefRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
