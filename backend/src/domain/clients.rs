//! Gym client identity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Human name used in not-found failures for clients.
pub const CLIENT_RESOURCE: &str = "Client";

/// Stable client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ClientId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(Self)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Accepted input for registering a client.
///
/// Field constraints are enforced at the HTTP boundary before a draft is
/// built; the draft itself carries no further checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// A registered gym client.
///
/// ## Invariants
/// - `email` is stored lower-cased.
/// - `full_name` has no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    id: ClientId,
    #[schema(example = "Ada Lovelace")]
    full_name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl Client {
    /// Register a client from an accepted draft.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Client, ClientDraft, ClientId};
    /// use chrono::Utc;
    ///
    /// let client = Client::register(
    ///     ClientId::random(),
    ///     ClientDraft {
    ///         full_name: "  Ada Lovelace ".into(),
    ///         email: "Ada@Example.com".into(),
    ///         phone: None,
    ///         birth_date: None,
    ///     },
    ///     Utc::now(),
    /// );
    /// assert_eq!(client.full_name(), "Ada Lovelace");
    /// assert_eq!(client.email(), "ada@example.com");
    /// ```
    pub fn register(id: ClientId, draft: ClientDraft, created_at: DateTime<Utc>) -> Self {
        let ClientDraft {
            full_name,
            email,
            phone,
            birth_date,
        } = draft;
        Self {
            id,
            full_name: full_name.trim().to_owned(),
            email: email.trim().to_lowercase(),
            phone: phone.map(|value| value.trim().to_owned()),
            birth_date,
            created_at,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn client_serialises_in_camel_case_without_absent_optionals() {
        let id: ClientId = "3fa85f64-5717-4562-b3fc-2c963f66afa6"
            .parse()
            .expect("valid uuid");
        let created_at = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let client = Client::register(
            id,
            ClientDraft {
                full_name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
                phone: None,
                birth_date: NaiveDate::from_ymd_opt(1990, 12, 9),
            },
            created_at,
        );

        let value = serde_json::to_value(&client).expect("client serialises");
        assert_eq!(
            value,
            json!({
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "fullName": "Grace Hopper",
                "email": "grace@example.com",
                "birthDate": "1990-12-09",
                "createdAt": "2026-03-01T09:30:00Z",
            })
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn client_id_rejects_malformed_input(#[case] raw: &str) {
        assert!(raw.parse::<ClientId>().is_err());
    }
}
