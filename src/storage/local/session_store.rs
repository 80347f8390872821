//! Typed accessors over the browser-local persisted state.
//!
//! Three kinds of blobs live here, under the product's historical key names:
//! the single active session (`mlpdv_session`), one remembered
//! credential per tenant (`mlpdv_remember_{cnpj}`) and the recently accessed
//! tenant list (`mlpdv_saved_companies`).
//!
//! Reads never fail: a missing, unreadable or unparseable blob degrades to
//! "absent" (the user is simply not logged in / has no history) and the next
//! successful write heals the slot.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::models::{RecentTenantEntry, RememberedCredential, Session};
use crate::domain::tenant::TenantKey;
use crate::storage::local::kv::KeyValueStore;

const SESSION_KEY: &str = "mlpdv_session";
const RECENT_TENANTS_KEY: &str = "mlpdv_saved_companies";

fn remember_key(tenant: &TenantKey) -> String {
    format!("mlpdv_remember_{}", tenant)
}

/// The only shared mutable cross-page resource. Last writer wins; one active
/// browser context is assumed per session.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("failed to read local state key {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("local state key {key} is unreadable, treating as absent: {err}");
                None
            }
        }
    }

    fn write_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw)
    }

    // --- active session ------------------------------------------------

    pub fn active_session(&self) -> Option<Session> {
        self.read_blob(SESSION_KEY)
    }

    /// Replaces any existing session unconditionally, no merge semantics.
    pub fn set_active_session(&self, session: &Session) -> Result<()> {
        info!(
            "storing session for user {} at tenant {}",
            session.user_id, session.tenant
        );
        self.write_blob(SESSION_KEY, session)
    }

    /// Safe to call with no session present.
    pub fn clear_active_session(&self) -> Result<()> {
        self.kv.remove(SESSION_KEY)
    }

    // --- remembered credentials ----------------------------------------

    pub fn remembered_credential(&self, tenant: &TenantKey) -> Option<RememberedCredential> {
        self.read_blob(&remember_key(tenant))
    }

    pub fn set_remembered_credential(
        &self,
        tenant: &TenantKey,
        login: &str,
        secret: &str,
    ) -> Result<()> {
        let credential = RememberedCredential {
            tenant: tenant.clone(),
            login: login.to_string(),
            secret: secret.to_string(),
        };
        self.write_blob(&remember_key(tenant), &credential)
    }

    pub fn clear_remembered_credential(&self, tenant: &TenantKey) -> Result<()> {
        self.kv.remove(&remember_key(tenant))
    }

    // --- recent tenants ------------------------------------------------

    /// Snapshot of the recently accessed tenants, most recent first. The
    /// ordering is computed here, at read time.
    pub fn recent_tenants(&self) -> Vec<RecentTenantEntry> {
        let mut entries: Vec<RecentTenantEntry> =
            self.read_blob(RECENT_TENANTS_KEY).unwrap_or_default();
        entries.sort_by(|a, b| b.last_access.cmp(&a.last_access));
        entries
    }

    /// Insert the tenant or refresh its last access to now.
    pub fn upsert_recent_tenant(&self, tenant: &TenantKey, name: &str) -> Result<()> {
        self.upsert_recent_tenant_at(tenant, name, Utc::now())
    }

    pub fn upsert_recent_tenant_at(
        &self,
        tenant: &TenantKey,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut entries: Vec<RecentTenantEntry> =
            self.read_blob(RECENT_TENANTS_KEY).unwrap_or_default();
        entries.retain(|entry| &entry.tenant != tenant);
        entries.push(RecentTenantEntry {
            tenant: tenant.clone(),
            name: name.to_string(),
            last_access: now,
        });
        self.write_blob(RECENT_TENANTS_KEY, &entries)
    }

    /// No-op when the tenant was never saved.
    pub fn remove_recent_tenant(&self, tenant: &TenantKey) -> Result<()> {
        let mut entries: Vec<RecentTenantEntry> =
            self.read_blob(RECENT_TENANTS_KEY).unwrap_or_default();
        entries.retain(|entry| &entry.tenant != tenant);
        self.write_blob(RECENT_TENANTS_KEY, &entries)
    }
}
