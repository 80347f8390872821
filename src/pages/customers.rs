//! Customer page: guarded listing, search, and the record form.

use log::error;

use crate::domain::commands::customers::SaveCustomerCommand;
use crate::domain::models::Customer;
use crate::domain::tenant::{format_cpf_input, TenantKey};
use crate::domain::{CustomerService, GuardState, PageGuard};
use crate::pages::user_message;
use crate::storage::SessionStore;

/// Editor state for one customer. All fields are the raw text the user typed;
/// normalization happens on save.
#[derive(Default)]
pub struct CustomerForm {
    pub id: Option<String>,
    pub cpf_cnpj: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

impl CustomerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id.clone()),
            cpf_cnpj: customer
                .cpf_cnpj
                .as_deref()
                .map(format_cpf_input)
                .unwrap_or_default(),
            name: customer.name.clone(),
            phone: customer.phone.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
            cep: customer.cep.clone().unwrap_or_default(),
            street: customer.street.clone().unwrap_or_default(),
            number: customer.number.clone().unwrap_or_default(),
            district: customer.district.clone().unwrap_or_default(),
            city: customer.city.clone().unwrap_or_default(),
            state: customer.state.clone().unwrap_or_default(),
        }
    }

    /// CPF/CNPJ field input handler, applies the CPF punctuation mask.
    pub fn set_cpf_cnpj(&mut self, raw: &str) {
        self.cpf_cnpj = format_cpf_input(raw);
    }

    fn command(&self, tenant: &TenantKey) -> SaveCustomerCommand {
        SaveCustomerCommand {
            tenant: tenant.clone(),
            id: self.id.clone(),
            cpf_cnpj: self.cpf_cnpj.clone(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            cep: self.cep.clone(),
            street: self.street.clone(),
            number: self.number.clone(),
            district: self.district.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
        }
    }
}

pub struct CustomersPage {
    customers: CustomerService,
    sessions: SessionStore,
    guard: PageGuard,
    pub items: Vec<Customer>,
    pub search: String,
    pub form: Option<CustomerForm>,
    pub saving: bool,
    pub error: Option<String>,
}

impl CustomersPage {
    pub fn new(customers: CustomerService, sessions: SessionStore, tenant: TenantKey) -> Self {
        Self {
            customers,
            sessions,
            guard: PageGuard::new(tenant),
            items: Vec::new(),
            search: String::new(),
            form: None,
            saving: false,
            error: None,
        }
    }

    /// Run the guard, then load the active customers. Returns the login path
    /// when the guard denies entry.
    pub fn enter(&mut self) -> Option<String> {
        let session = self.sessions.active_session();
        if self.guard.check(session.as_ref()) == &GuardState::Redirecting {
            return self.guard.redirect_target();
        }
        self.reload();
        None
    }

    pub fn authorized(&self) -> bool {
        self.guard.state() == &GuardState::Authorized
    }

    pub fn reload(&mut self) {
        match self.customers.list(self.guard.tenant(), true) {
            Ok(items) => self.items = items,
            Err(err) => {
                error!("failed to list customers: {err}");
                self.items = Vec::new();
                self.error = Some(user_message(&err));
            }
        }
    }

    /// Case-insensitive filter over name, document and phone.
    pub fn filtered(&self) -> Vec<&Customer> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.cpf_cnpj.as_deref().is_some_and(|d| d.contains(&needle))
                    || c.phone.as_deref().is_some_and(|p| p.contains(&needle))
            })
            .collect()
    }

    pub fn open_new(&mut self) {
        self.form = Some(CustomerForm::new());
        self.error = None;
    }

    pub fn open_edit(&mut self, customer: &Customer) {
        self.form = Some(CustomerForm::from_customer(customer));
        self.error = None;
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Persist the open form. Success closes it and refreshes the listing.
    pub fn save(&mut self) {
        if self.saving {
            return;
        }
        let Some(form) = &self.form else {
            return;
        };
        self.saving = true;
        self.error = None;

        let outcome = self.customers.save(form.command(self.guard.tenant()));
        self.saving = false;
        match outcome {
            Ok(_) => {
                self.form = None;
                self.reload();
            }
            Err(err) => {
                error!("failed to save customer: {err}");
                self.error = Some(user_message(&err));
            }
        }
    }

    /// Deactivate a customer and refresh.
    pub fn delete(&mut self, id: &str) {
        if let Err(err) = self.customers.soft_delete(self.guard.tenant(), id) {
            error!("failed to deactivate customer {id}: {err}");
            self.error = Some(user_message(&err));
            return;
        }
        self.reload();
    }
}
