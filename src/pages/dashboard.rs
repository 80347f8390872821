//! Tenant dashboard: company header, record counts, logout.

use log::error;

use crate::domain::models::{Company, Session};
use crate::domain::tenant::TenantKey;
use crate::domain::{routes, AuthService, CompanyService, DashboardStats, GuardState, PageGuard};
use crate::storage::SessionStore;

pub struct DashboardPage {
    companies: CompanyService,
    auth: AuthService,
    sessions: SessionStore,
    guard: PageGuard,
    pub session: Option<Session>,
    pub company: Option<Company>,
    pub stats: DashboardStats,
    pub error: Option<String>,
}

impl DashboardPage {
    pub fn new(
        companies: CompanyService,
        auth: AuthService,
        sessions: SessionStore,
        tenant: TenantKey,
    ) -> Self {
        Self {
            companies,
            auth,
            sessions,
            guard: PageGuard::new(tenant),
            session: None,
            company: None,
            stats: DashboardStats::default(),
            error: None,
        }
    }

    /// Run the guard and, when authorized, load the header and the counts.
    /// Returns the login path to redirect to when the guard denies entry.
    pub fn enter(&mut self) -> Option<String> {
        let session = self.sessions.active_session();
        if self.guard.check(session.as_ref()) == &GuardState::Redirecting {
            return self.guard.redirect_target();
        }
        self.session = session;
        self.load();
        None
    }

    fn load(&mut self) {
        let tenant = self.guard.tenant().clone();
        match self.companies.company_header(&tenant) {
            Ok(company) => self.company = company,
            Err(err) => {
                error!("failed to load company header for {tenant}: {err}");
                self.error = Some("Erro ao comunicar com o servidor".to_string());
            }
        }
        match self.companies.dashboard_stats(&tenant) {
            Ok(stats) => self.stats = stats,
            Err(err) => {
                error!("failed to load dashboard stats for {tenant}: {err}");
                self.stats = DashboardStats::default();
            }
        }
    }

    pub fn authorized(&self) -> bool {
        self.guard.state() == &GuardState::Authorized
    }

    /// Clear the session and hand back the tenant's login path.
    pub fn logout(&mut self) -> String {
        if let Err(err) = self.auth.logout() {
            error!("logout failed: {err}");
        }
        self.session = None;
        routes::login_path(self.guard.tenant())
    }
}
