//! Customer record editor.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::customers::SaveCustomerCommand;
use crate::domain::error::{BackofficeError, Result};
use crate::domain::models::Customer;
use crate::domain::tenant::{strip_non_digits, TenantKey};
use crate::storage::traits::CustomerStore;

#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerStore>) -> Self {
        Self { customers }
    }

    /// Customers of one tenant, ordered by name.
    pub fn list(&self, tenant: &TenantKey, active_only: bool) -> Result<Vec<Customer>> {
        Ok(self.customers.list_customers(tenant, active_only)?)
    }

    /// Insert or update by remote id, never both. Names are upper-cased,
    /// numeric-looking identifiers keep digits only.
    pub fn save(&self, command: SaveCustomerCommand) -> Result<Customer> {
        if command.name.trim().is_empty() {
            return Err(BackofficeError::InvalidInput(
                "Informe o nome do cliente".to_string(),
            ));
        }
        let now = Utc::now();

        let optional = |value: &str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        let digits = |value: &str| {
            let digits = strip_non_digits(value);
            if digits.is_empty() {
                None
            } else {
                Some(digits)
            }
        };

        let name = command.name.trim().to_uppercase();
        let cpf_cnpj = digits(&command.cpf_cnpj);
        let phone = digits(&command.phone);
        let cep = digits(&command.cep);
        let email = optional(&command.email);
        let street = optional(&command.street);
        let number = optional(&command.number);
        let district = optional(&command.district);
        let city = optional(&command.city);
        let state = optional(&command.state).map(|v| v.to_uppercase());

        match &command.id {
            None => {
                if !command.tenant.is_complete() {
                    return Err(BackofficeError::InvalidInput(
                        "CNPJ deve ter 14 dígitos".to_string(),
                    ));
                }
                let customer = Customer {
                    id: String::new(),
                    cnpj: command.tenant.clone(),
                    local_id: Some(format!("web_{}", now.timestamp_millis())),
                    origin: "web".to_string(),
                    cpf_cnpj,
                    name,
                    phone,
                    email,
                    cep,
                    street,
                    number,
                    district,
                    city,
                    state,
                    active: true,
                    created_at: now,
                    updated_at: now,
                };
                let stored = self.customers.insert_customer(&customer)?;
                info!("created customer {} ({})", stored.name, stored.id);
                Ok(stored)
            }
            Some(id) => {
                let mut customer = self
                    .customers
                    .find_customer(&command.tenant, id)?
                    .ok_or_else(|| {
                        warn!("customer {} not found for tenant {}", id, command.tenant);
                        BackofficeError::Store(anyhow::anyhow!("cliente {id} não encontrado"))
                    })?;
                customer.cpf_cnpj = cpf_cnpj;
                customer.name = name;
                customer.phone = phone;
                customer.email = email;
                customer.cep = cep;
                customer.street = street;
                customer.number = number;
                customer.district = district;
                customer.city = city;
                customer.state = state;
                customer.updated_at = now;
                self.customers.update_customer(&customer)?;
                info!("updated customer {} ({})", customer.name, customer.id);
                Ok(customer)
            }
        }
    }

    /// Mark the record inactive instead of erasing it.
    pub fn soft_delete(&self, tenant: &TenantKey, id: &str) -> Result<()> {
        let mut customer = self.customers.find_customer(tenant, id)?.ok_or_else(|| {
            BackofficeError::Store(anyhow::anyhow!("cliente {id} não encontrado"))
        })?;
        customer.active = false;
        customer.updated_at = Utc::now();
        self.customers.update_customer(&customer)?;
        info!("deactivated customer {} ({})", customer.name, customer.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn setup() -> CustomerService {
        CustomerService::new(Arc::new(MemoryStore::new()))
    }

    fn tenant() -> TenantKey {
        TenantKey::normalize("12345678000195")
    }

    fn save_command(name: &str) -> SaveCustomerCommand {
        SaveCustomerCommand {
            tenant: tenant(),
            id: None,
            cpf_cnpj: "123.456.789-01".to_string(),
            name: name.to_string(),
            phone: "(51) 99999-0000".to_string(),
            email: "joao@example.com".to_string(),
            cep: "95560-000".to_string(),
            street: "Rua das Flores".to_string(),
            number: "100".to_string(),
            district: "Centro".to_string(),
            city: "Torres".to_string(),
            state: "rs".to_string(),
        }
    }

    #[test]
    fn create_normalizes_identity_fields() {
        let service = setup();
        let customer = service.save(save_command("João da Silva")).unwrap();

        assert_eq!(customer.name, "JOÃO DA SILVA");
        assert_eq!(customer.cpf_cnpj.as_deref(), Some("12345678901"));
        assert_eq!(customer.phone.as_deref(), Some("51999990000"));
        assert_eq!(customer.cep.as_deref(), Some("95560000"));
        assert_eq!(customer.state.as_deref(), Some("RS"));
        assert_eq!(customer.origin, "web");
        assert!(customer.local_id.unwrap().starts_with("web_"));
        assert!(customer.active);
    }

    #[test]
    fn empty_optional_fields_persist_as_absent() {
        let service = setup();
        let mut command = save_command("Maria");
        command.cpf_cnpj = String::new();
        command.phone = "  ".to_string();
        command.email = String::new();

        let customer = service.save(command).unwrap();
        assert_eq!(customer.cpf_cnpj, None);
        assert_eq!(customer.phone, None);
        assert_eq!(customer.email, None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let service = setup();
        let mut command = save_command(" ");
        command.name = " ".to_string();
        assert!(matches!(
            service.save(command),
            Err(BackofficeError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_by_id_never_inserts() {
        let service = setup();
        let created = service.save(save_command("Maria")).unwrap();

        let mut command = save_command("Maria Souza");
        command.id = Some(created.id.clone());
        let updated = service.save(command).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "MARIA SOUZA");
        assert_eq!(service.list(&tenant(), false).unwrap().len(), 1);
    }

    #[test]
    fn list_is_ordered_by_name() {
        let service = setup();
        service.save(save_command("Zilda")).unwrap();
        service.save(save_command("Ana")).unwrap();

        let names: Vec<String> = service
            .list(&tenant(), true)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["ANA", "ZILDA"]);
    }

    #[test]
    fn soft_delete_keeps_the_record() {
        let service = setup();
        let customer = service.save(save_command("Maria")).unwrap();

        service.soft_delete(&tenant(), &customer.id).unwrap();

        assert!(service.list(&tenant(), true).unwrap().is_empty());
        assert_eq!(service.list(&tenant(), false).unwrap().len(), 1);
    }
}
