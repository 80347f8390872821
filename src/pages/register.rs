//! Two-step company registration page.

use log::error;

use crate::domain::commands::auth::RegisterCommand;
use crate::domain::tenant::{format_cnpj_input, format_cpf_input, TenantKey};
use crate::domain::{routes, AuthService};
use crate::pages::user_message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStep {
    /// Company data.
    Company,
    /// Administrator data.
    Administrator,
    /// Registration confirmed; offer the login link.
    Done,
}

pub struct RegisterPage {
    auth: AuthService,
    pub step: RegisterStep,
    // Company form.
    pub cnpj: String,
    pub legal_name: String,
    pub trade_name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    // Administrator form.
    pub admin_name: String,
    pub admin_cpf: String,
    pub password: String,
    pub password_confirmation: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl RegisterPage {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            step: RegisterStep::Company,
            cnpj: String::new(),
            legal_name: String::new(),
            trade_name: String::new(),
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            email: String::new(),
            admin_name: String::new(),
            admin_cpf: String::new(),
            password: String::new(),
            password_confirmation: String::new(),
            loading: false,
            error: None,
        }
    }

    pub fn set_cnpj(&mut self, raw: &str) {
        self.cnpj = format_cnpj_input(raw);
    }

    pub fn set_admin_cpf(&mut self, raw: &str) {
        self.admin_cpf = format_cpf_input(raw);
    }

    /// UF field keeps at most two letters, upper-cased.
    pub fn set_state(&mut self, raw: &str) {
        self.state = raw.to_uppercase().chars().take(2).collect();
    }

    /// Advance from the company step once its required fields are filled.
    pub fn continue_to_administrator(&mut self) {
        if !TenantKey::normalize(&self.cnpj).is_complete() {
            self.error = Some("CNPJ deve ter 14 dígitos".to_string());
            return;
        }
        if self.legal_name.trim().is_empty() {
            self.error = Some("Informe a razão social".to_string());
            return;
        }
        self.error = None;
        self.step = RegisterStep::Administrator;
    }

    pub fn back_to_company(&mut self) {
        self.step = RegisterStep::Company;
        self.error = None;
    }

    /// Submit both halves of the registration. Success lands on the done
    /// step; the login link is available through [`RegisterPage::login_path`].
    pub fn submit(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let outcome = self.auth.register(RegisterCommand {
            cnpj: self.cnpj.clone(),
            legal_name: self.legal_name.clone(),
            trade_name: self.trade_name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            admin_name: self.admin_name.clone(),
            admin_cpf: self.admin_cpf.clone(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        });
        self.loading = false;
        match outcome {
            Ok(_) => self.step = RegisterStep::Done,
            Err(err) => {
                error!("registration failed: {err}");
                self.error = Some(user_message(&err));
            }
        }
    }

    /// Login path of the registered tenant, for the done-step button.
    pub fn login_path(&self) -> String {
        routes::login_path(&TenantKey::normalize(&self.cnpj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{CompanyStore, MemoryKeyValueStore, MemoryStore, SessionStore};
    use std::sync::Arc;

    fn setup() -> (RegisterPage, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let auth = AuthService::new(store.clone(), sessions);
        (RegisterPage::new(auth), store)
    }

    fn fill_company(page: &mut RegisterPage) {
        page.set_cnpj("12345678000195");
        page.legal_name = "Acme Ltda".to_string();
        page.trade_name = "Acme".to_string();
        page.set_state("rs");
    }

    fn fill_administrator(page: &mut RegisterPage) {
        page.admin_name = "Maria".to_string();
        page.set_admin_cpf("12345678901");
        page.password = "senha123".to_string();
        page.password_confirmation = "senha123".to_string();
    }

    #[test]
    fn company_step_validates_before_advancing() {
        let (mut page, _) = setup();
        page.continue_to_administrator();
        assert_eq!(page.step, RegisterStep::Company);
        assert_eq!(page.error.as_deref(), Some("CNPJ deve ter 14 dígitos"));

        fill_company(&mut page);
        page.continue_to_administrator();
        assert_eq!(page.step, RegisterStep::Administrator);
        assert!(page.error.is_none());
    }

    #[test]
    fn input_masks_apply() {
        let (mut page, _) = setup();
        page.set_cnpj("12345678000195");
        assert_eq!(page.cnpj, "12.345.678/0001-95");
        page.set_admin_cpf("12345678901");
        assert_eq!(page.admin_cpf, "123.456.789-01");
        page.set_state("rio grande");
        assert_eq!(page.state, "RI");
    }

    #[test]
    fn mismatched_passwords_stay_on_the_form() {
        let (mut page, _) = setup();
        fill_company(&mut page);
        page.continue_to_administrator();
        fill_administrator(&mut page);
        page.password_confirmation = "outra".to_string();

        page.submit();
        assert_eq!(page.step, RegisterStep::Administrator);
        assert_eq!(page.error.as_deref(), Some("As senhas não conferem"));
    }

    #[test]
    fn full_registration_reaches_the_done_step() {
        let (mut page, store) = setup();
        fill_company(&mut page);
        page.continue_to_administrator();
        fill_administrator(&mut page);

        page.submit();
        assert_eq!(page.step, RegisterStep::Done);
        assert_eq!(page.login_path(), "/12345678000195");

        let company = store
            .find_company(&TenantKey::normalize("12345678000195"))
            .unwrap()
            .unwrap();
        assert_eq!(company.trade_name.as_deref(), Some("ACME"));
    }
}
