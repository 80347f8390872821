use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::tenant::TenantKey;

/// The single active authenticated identity, bound to one tenant.
///
/// Created by the login flow, persisted as one blob, replaced wholesale on
/// each successful login and removed on logout. Serialized field names match
/// the blob format the product has always written to browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: String,
    #[serde(rename = "cnpj")]
    pub tenant: TenantKey,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "perfil")]
    pub role: String,
    #[serde(rename = "permissoes")]
    pub permissions: Vec<String>,
    #[serde(rename = "loggedAt")]
    pub logged_at: DateTime<Utc>,
}

/// Opt-in login auto-fill for one tenant. One slot per tenant key; cleared
/// when the user later declines the option.
///
/// The secret is stored as entered. See DESIGN.md: keeping it behind the
/// typed session-store seam is what lets a real secret store replace the
/// plain blob without touching callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberedCredential {
    #[serde(rename = "cnpj")]
    pub tenant: TenantKey,
    pub login: String,
    #[serde(rename = "senha")]
    pub secret: String,
}

/// One entry of the "saved companies" list on the landing page. Keyed by
/// tenant, ordered for display by last access, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTenantEntry {
    #[serde(rename = "cnpj")]
    pub tenant: TenantKey,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "lastAccess")]
    pub last_access: DateTime<Utc>,
}

/// User row returned by the credential-verification procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub cnpj: TenantKey,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "perfil")]
    pub role: String,
    #[serde(rename = "permissoes", default)]
    pub permissions: Vec<String>,
}
