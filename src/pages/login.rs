//! Tenant login page.

use log::error;

use crate::domain::commands::auth::LoginCommand;
use crate::domain::tenant::{format_cpf_input, TenantKey};
use crate::domain::{routes, AuthService, CompanyService};
use crate::pages::user_message;
use crate::storage::SessionStore;

pub struct LoginPage {
    auth: AuthService,
    companies: CompanyService,
    tenant: TenantKey,
    /// Company header, when the tenant resolves.
    pub company_name: Option<String>,
    pub cpf_input: String,
    pub password: String,
    pub remember: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginPage {
    /// Build the page for the URL's tenant: loads the company header and
    /// pre-fills the form from the tenant's remembered credential, if any.
    pub fn new(
        auth: AuthService,
        companies: CompanyService,
        sessions: &SessionStore,
        tenant: TenantKey,
    ) -> Self {
        let mut page = Self {
            auth,
            companies,
            tenant,
            company_name: None,
            cpf_input: String::new(),
            password: String::new(),
            remember: false,
            loading: false,
            error: None,
        };
        page.reload_header();
        if let Some(saved) = sessions.remembered_credential(&page.tenant) {
            page.cpf_input = format_cpf_input(&saved.login);
            page.password = saved.secret;
            page.remember = true;
        }
        page
    }

    pub fn tenant(&self) -> &TenantKey {
        &self.tenant
    }

    /// Resolve the company header. An unknown tenant renders without a
    /// name; a failed read is treated the same way.
    pub fn reload_header(&mut self) {
        self.company_name = match self.companies.company_header(&self.tenant) {
            Ok(company) => company.map(|c| c.display_name().to_string()),
            Err(err) => {
                error!("failed to load company header for {}: {err}", self.tenant);
                None
            }
        };
    }

    /// CPF field input handler, applies the punctuation mask.
    pub fn set_cpf_input(&mut self, raw: &str) {
        self.cpf_input = format_cpf_input(raw);
    }

    /// Submit the form. On success returns the dashboard path to navigate
    /// to; on failure the inline message is set.
    pub fn submit(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;

        let outcome = self.auth.login(LoginCommand {
            tenant: self.tenant.clone(),
            login: self.cpf_input.clone(),
            secret: self.password.clone(),
            remember: self.remember,
        });
        self.loading = false;
        match outcome {
            Ok(result) => Some(routes::dashboard_path(&result.session.tenant)),
            Err(err) => {
                error!("login failed for tenant {}: {err}", self.tenant);
                self.error = Some(user_message(&err));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::auth::RegisterCommand;
    use crate::storage::{MemoryKeyValueStore, MemoryStore};
    use std::sync::Arc;

    struct Fixture {
        auth: AuthService,
        companies: CompanyService,
        sessions: SessionStore,
    }

    fn setup() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let auth = AuthService::new(store.clone(), sessions.clone());
        let companies = CompanyService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            sessions.clone(),
        );
        auth.register(RegisterCommand {
            cnpj: "12345678000195".to_string(),
            legal_name: "Acme Ltda".to_string(),
            trade_name: "Acme".to_string(),
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            email: String::new(),
            admin_name: "Maria".to_string(),
            admin_cpf: "12345678901".to_string(),
            password: "senha123".to_string(),
            password_confirmation: "senha123".to_string(),
        })
        .unwrap();
        Fixture {
            auth,
            companies,
            sessions,
        }
    }

    fn page(fixture: &Fixture, cnpj: &str) -> LoginPage {
        LoginPage::new(
            fixture.auth.clone(),
            fixture.companies.clone(),
            &fixture.sessions,
            TenantKey::normalize(cnpj),
        )
    }

    #[test]
    fn header_shows_the_company_name() {
        let fixture = setup();
        let page = page(&fixture, "12345678000195");
        assert_eq!(page.company_name.as_deref(), Some("ACME"));
    }

    #[test]
    fn unknown_tenant_renders_without_a_name() {
        let fixture = setup();
        let page = page(&fixture, "99999999000199");
        assert_eq!(page.company_name, None);
    }

    #[test]
    fn successful_login_navigates_to_the_dashboard() {
        let fixture = setup();
        let mut page = page(&fixture, "12345678000195");
        page.set_cpf_input("12345678901");
        assert_eq!(page.cpf_input, "123.456.789-01");
        page.password = "senha123".to_string();

        let target = page.submit();
        assert_eq!(target.as_deref(), Some("/12345678000195/dashboard"));
        assert!(page.error.is_none());
        assert!(fixture.sessions.active_session().is_some());
    }

    #[test]
    fn wrong_password_shows_the_inline_message() {
        let fixture = setup();
        let mut page = page(&fixture, "12345678000195");
        page.set_cpf_input("12345678901");
        page.password = "errada".to_string();

        assert_eq!(page.submit(), None);
        assert_eq!(page.error.as_deref(), Some("CPF ou senha incorretos"));
    }

    #[test]
    fn remembered_credential_prefills_the_form() {
        let fixture = setup();
        let tenant = TenantKey::normalize("12345678000195");
        {
            let mut first = page(&fixture, "12345678000195");
            first.set_cpf_input("12345678901");
            first.password = "senha123".to_string();
            first.remember = true;
            first.submit().unwrap();
        }

        let revisit = page(&fixture, "12345678000195");
        assert_eq!(revisit.cpf_input, "123.456.789-01");
        assert_eq!(revisit.password, "senha123");
        assert!(revisit.remember);
        assert!(fixture.sessions.remembered_credential(&tenant).is_some());
    }

    #[test]
    fn empty_tenant_in_url_is_an_input_error() {
        let fixture = setup();
        let mut page = page(&fixture, "");
        page.password = "x".to_string();
        assert_eq!(page.submit(), None);
        assert_eq!(page.error.as_deref(), Some("CNPJ não informado na URL"));
    }
}
