//! Tenant-selection landing page: the saved-companies list plus the
//! add-by-CNPJ form.

use log::error;

use crate::domain::models::RecentTenantEntry;
use crate::domain::tenant::{format_cnpj_input, TenantKey};
use crate::domain::{routes, CompanyService};
use crate::pages::user_message;
use crate::storage::SessionStore;

pub struct HomePage {
    companies: CompanyService,
    sessions: SessionStore,
    pub saved: Vec<RecentTenantEntry>,
    pub show_add: bool,
    pub cnpj_input: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl HomePage {
    pub fn new(companies: CompanyService, sessions: SessionStore) -> Self {
        let mut page = Self {
            companies,
            sessions,
            saved: Vec::new(),
            show_add: false,
            cnpj_input: String::new(),
            loading: false,
            error: None,
        };
        page.reload();
        page
    }

    /// Refresh the saved-companies snapshot, most recent first.
    pub fn reload(&mut self) {
        self.saved = self.sessions.recent_tenants();
    }

    pub fn open_add(&mut self) {
        self.show_add = true;
    }

    pub fn cancel_add(&mut self) {
        self.show_add = false;
        self.error = None;
        self.cnpj_input.clear();
    }

    /// CNPJ field input handler, applies the punctuation mask.
    pub fn set_cnpj_input(&mut self, raw: &str) {
        self.cnpj_input = format_cnpj_input(raw);
    }

    /// Look the typed CNPJ up and, when it resolves, save it and navigate to
    /// its login page. Returns the navigation target.
    pub fn add_company(&mut self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;

        let outcome = self.companies.lookup(&self.cnpj_input);
        self.loading = false;
        match outcome {
            Ok(company) => {
                self.cnpj_input.clear();
                self.show_add = false;
                self.reload();
                Some(routes::login_path(&company.cnpj))
            }
            Err(err) => {
                error!("company lookup failed: {err}");
                self.error = Some(user_message(&err));
                None
            }
        }
    }

    /// Reopen a saved company: refresh its position and navigate to login.
    pub fn access_company(&mut self, tenant: &TenantKey) -> String {
        if let Err(err) = self.companies.touch_recent(tenant) {
            error!("failed to refresh recent tenant {tenant}: {err}");
        }
        self.reload();
        routes::login_path(tenant)
    }

    /// Drop a company from the saved list.
    pub fn remove_company(&mut self, tenant: &TenantKey) {
        if let Err(err) = self.companies.remove_recent(tenant) {
            error!("failed to remove recent tenant {tenant}: {err}");
        }
        self.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Company;
    use crate::storage::{AuthStore, MemoryKeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn setup() -> (HomePage, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let companies = CompanyService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            sessions.clone(),
        );
        (HomePage::new(companies, sessions), store)
    }

    fn seed_company(store: &MemoryStore, cnpj: &str, name: &str) {
        store
            .upsert_company(&Company {
                cnpj: TenantKey::normalize(cnpj),
                legal_name: name.to_string(),
                trade_name: None,
                city: None,
                state: None,
                phone: None,
                email: None,
                origin: "web".to_string(),
            })
            .unwrap();
    }

    #[test]
    fn input_mask_is_applied_as_the_user_types() {
        let (mut page, _) = setup();
        page.set_cnpj_input("12345678");
        assert_eq!(page.cnpj_input, "12.345.678");
    }

    #[test]
    fn short_cnpj_shows_the_validation_message() {
        let (mut page, _) = setup();
        page.open_add();
        page.set_cnpj_input("123");
        assert_eq!(page.add_company(), None);
        assert_eq!(page.error.as_deref(), Some("CNPJ deve ter 14 dígitos"));
    }

    #[test]
    fn unknown_company_shows_not_found() {
        let (mut page, _) = setup();
        page.set_cnpj_input("12345678000195");
        assert_eq!(page.add_company(), None);
        assert_eq!(page.error.as_deref(), Some("Empresa não encontrada"));
        assert!(page.saved.is_empty());
    }

    #[test]
    fn adding_a_company_saves_it_and_navigates_to_login() {
        let (mut page, store) = setup();
        seed_company(&store, "12345678000195", "ACME LTDA");

        page.open_add();
        page.set_cnpj_input("12.345.678/0001-95");
        let target = page.add_company();

        assert_eq!(target.as_deref(), Some("/12345678000195"));
        assert!(!page.show_add);
        assert!(page.cnpj_input.is_empty());
        assert_eq!(page.saved.len(), 1);
        assert_eq!(page.saved[0].name, "ACME LTDA");
    }

    #[test]
    fn remove_company_updates_the_list() {
        let (mut page, store) = setup();
        seed_company(&store, "12345678000195", "ACME LTDA");
        page.set_cnpj_input("12345678000195");
        page.add_company();

        page.remove_company(&TenantKey::normalize("12345678000195"));
        assert!(page.saved.is_empty());
    }

    #[test]
    fn access_company_navigates_to_login() {
        let (mut page, store) = setup();
        seed_company(&store, "12345678000195", "ACME LTDA");
        page.set_cnpj_input("12345678000195");
        page.add_company();

        let target = page.access_company(&TenantKey::normalize("12345678000195"));
        assert_eq!(target, "/12345678000195");
    }
}
