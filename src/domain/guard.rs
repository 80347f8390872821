//! Session gate for tenant-scoped pages.
//!
//! Every protected page runs the guard on entry. The guard compares tenant
//! identity, not mere session presence: a session logged into another tenant
//! must not authorize this page.

use log::{debug, warn};

use crate::domain::models::Session;
use crate::domain::routes;
use crate::domain::tenant::TenantKey;

/// Guard lifecycle. `Unchecked` only exists between page entry and the first
/// [`PageGuard::check`]; both outcomes are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Unchecked,
    Authorized,
    /// No content renders; navigation goes to the tenant's login page.
    Redirecting,
}

/// Per-page guard instance, bound to the page's URL-derived tenant key.
#[derive(Debug, Clone)]
pub struct PageGuard {
    tenant: TenantKey,
    state: GuardState,
}

impl PageGuard {
    pub fn new(url_tenant: TenantKey) -> Self {
        Self {
            tenant: url_tenant,
            state: GuardState::Unchecked,
        }
    }

    /// Decide the page's fate from the current session. The first call is
    /// the only one that transitions; the decision then sticks.
    pub fn check(&mut self, session: Option<&Session>) -> &GuardState {
        if self.state != GuardState::Unchecked {
            return &self.state;
        }
        self.state = match session {
            Some(s) if s.tenant == self.tenant => {
                debug!("session authorized for tenant {}", self.tenant);
                GuardState::Authorized
            }
            Some(s) => {
                warn!(
                    "session tenant {} does not match page tenant {}, redirecting to login",
                    s.tenant, self.tenant
                );
                GuardState::Redirecting
            }
            None => {
                debug!("no active session, redirecting to login for {}", self.tenant);
                GuardState::Redirecting
            }
        };
        &self.state
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    pub fn tenant(&self) -> &TenantKey {
        &self.tenant
    }

    /// Login entry point of this page's tenant, only once the guard decided
    /// to redirect.
    pub fn redirect_target(&self) -> Option<String> {
        match self.state {
            GuardState::Redirecting => Some(routes::login_path(&self.tenant)),
            _ => None,
        }
    }
}
