//! Permission extraction.
//!
//! Authentication happens upstream. The authorization layer forwards the
//! caller's grants in a trusted header; this module only reads them.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload};

use crate::domain::{Permission, PermissionSet};

/// Header carrying the caller's comma separated permission grants.
pub const GRANTED_PERMISSIONS_HEADER: &str = "x-granted-permissions";

/// Permissions granted to the current caller.
///
/// A missing or unreadable header yields an empty set, so every permission
/// check then fails with an authorization error.
#[derive(Debug, Clone, Default)]
pub struct Permissions(PermissionSet);

impl Permissions {
    pub fn require(&self, permission: Permission) -> Result<(), crate::domain::Error> {
        self.0.require(permission)
    }

    pub fn granted(&self) -> &PermissionSet {
        &self.0
    }
}

impl FromRequest for Permissions {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let granted = req
            .headers()
            .get(GRANTED_PERMISSIONS_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(PermissionSet::parse)
            .unwrap_or_default();
        ready(Ok(Self(granted)))
    }
}
