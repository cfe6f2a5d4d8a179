//! Permission vocabulary shared with the upstream authorization layer.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::Error;

/// Operation-level permissions checked by handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ClientsRead,
    ClientsWrite,
    SalesWrite,
    SubscriptionsWrite,
    DashboardRead,
}

impl Permission {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientsRead => "clients:read",
            Self::ClientsWrite => "clients:write",
            Self::SalesWrite => "sales:write",
            Self::SubscriptionsWrite => "subscriptions:write",
            Self::DashboardRead => "dashboard:read",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unrecognised permission name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clients:read" => Ok(Self::ClientsRead),
            "clients:write" => Ok(Self::ClientsWrite),
            "sales:write" => Ok(Self::SalesWrite),
            "subscriptions:write" => Ok(Self::SubscriptionsWrite),
            "dashboard:read" => Ok(Self::DashboardRead),
            other => Err(UnknownPermission(other.to_owned())),
        }
    }
}

/// Permissions granted to the caller of the current request.
///
/// # Examples
/// ```
/// use backend::domain::{Permission, PermissionSet};
///
/// let granted = PermissionSet::parse("clients:read, dashboard:read");
/// assert!(granted.require(Permission::ClientsRead).is_ok());
/// assert!(granted.require(Permission::ClientsWrite).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    /// Parse a comma separated list; unknown names are skipped.
    pub fn parse(raw: &str) -> Self {
        let granted = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| match name.parse::<Permission>() {
                Ok(permission) => Some(permission),
                Err(error) => {
                    tracing::debug!(%error, "ignoring unrecognised permission grant");
                    None
                }
            })
            .collect();
        Self(granted)
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Fail with an authorization error naming `permission` when it is absent.
    pub fn require(&self, permission: Permission) -> Result<(), Error> {
        if self.contains(permission) {
            Ok(())
        } else {
            Err(Error::missing_permission(permission.as_str()))
        }
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
