//! In-memory remote store.
//!
//! Implements every remote-store trait against plain maps, assigning ids the
//! way the real store would. Backs the test suite and local development; the
//! deployed client points the same traits at the remote store.

use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::models::{Company, Customer, Product, UserRecord};
use crate::domain::tenant::TenantKey;
use crate::storage::traits::{
    AuthStore, CompanyStore, CustomerStore, ProductStore, SaleStore, UserUpsert,
};

#[derive(Debug, Clone)]
struct StoredUser {
    record: UserRecord,
    login: String,
    secret: String,
}

#[derive(Default)]
struct Inner {
    companies: HashMap<String, Company>,
    users: Vec<StoredUser>,
    products: Vec<Product>,
    customers: Vec<Customer>,
    /// Tenant keys of recorded sales; the back office only ever counts them.
    sales: Vec<TenantKey>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sale for a tenant (dashboard counts only).
    pub fn record_sale(&self, cnpj: &TenantKey) {
        self.inner.lock().unwrap().sales.push(cnpj.clone());
    }
}

impl CompanyStore for MemoryStore {
    fn find_company(&self, cnpj: &TenantKey) -> Result<Option<Company>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.companies.get(cnpj.as_str()).cloned())
    }
}

impl SaleStore for MemoryStore {
    fn count_sales(&self, cnpj: &TenantKey) -> Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.sales.iter().filter(|t| *t == cnpj).count() as u64)
    }
}

impl AuthStore for MemoryStore {
    fn verify_user(
        &self,
        cnpj: &TenantKey,
        login: &str,
        secret: &str,
    ) -> Result<Option<UserRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|u| u.record.cnpj == *cnpj && u.login == login && u.secret == secret)
            .map(|u| u.record.clone()))
    }

    fn upsert_company(&self, company: &Company) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .companies
            .insert(company.cnpj.as_str().to_string(), company.clone());
        Ok(())
    }

    fn upsert_user(&self, user: &UserUpsert) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let existing_id = inner
            .users
            .iter()
            .position(|u| u.record.cnpj == user.cnpj && u.login == user.login);
        let id = match existing_id {
            Some(index) => inner.users.remove(index).record.id,
            None => Uuid::new_v4().to_string(),
        };
        inner.users.push(StoredUser {
            record: UserRecord {
                id,
                cnpj: user.cnpj.clone(),
                display_name: user.name.clone(),
                role: user.role.clone(),
                permissions: Vec::new(),
            },
            login: user.login.clone(),
            secret: user.secret.clone(),
        });
        Ok(())
    }
}

impl ProductStore for MemoryStore {
    fn list_products(&self, cnpj: &TenantKey, active_only: bool) -> Result<Vec<Product>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| p.cnpj == *cnpj && (!active_only || p.active))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn find_product(&self, cnpj: &TenantKey, id: &str) -> Result<Option<Product>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .products
            .iter()
            .find(|p| p.cnpj == *cnpj && p.id == id)
            .cloned())
    }

    fn insert_product(&self, product: &Product) -> Result<Product> {
        let mut inner = self.inner.lock().unwrap();
        let mut stored = product.clone();
        stored.id = Uuid::new_v4().to_string();
        inner.products.push(stored.clone());
        Ok(stored)
    }

    fn update_product(&self, product: &Product) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| anyhow!("produto {} not found", product.id))?;
        *row = product.clone();
        Ok(())
    }

    fn count_products(&self, cnpj: &TenantKey) -> Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.products.iter().filter(|p| p.cnpj == *cnpj).count() as u64)
    }
}

impl CustomerStore for MemoryStore {
    fn list_customers(&self, cnpj: &TenantKey, active_only: bool) -> Result<Vec<Customer>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<Customer> = inner
            .customers
            .iter()
            .filter(|c| c.cnpj == *cnpj && (!active_only || c.active))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    fn find_customer(&self, cnpj: &TenantKey, id: &str) -> Result<Option<Customer>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .find(|c| c.cnpj == *cnpj && c.id == id)
            .cloned())
    }

    fn insert_customer(&self, customer: &Customer) -> Result<Customer> {
        let mut inner = self.inner.lock().unwrap();
        let mut stored = customer.clone();
        stored.id = Uuid::new_v4().to_string();
        inner.customers.push(stored.clone());
        Ok(stored)
    }

    fn update_customer(&self, customer: &Customer) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let row = inner
            .customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or_else(|| anyhow!("cliente {} not found", customer.id))?;
        *row = customer.clone();
        Ok(())
    }

    fn count_customers(&self, cnpj: &TenantKey) -> Result<u64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.customers.iter().filter(|c| c.cnpj == *cnpj).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProductPricing;
    use chrono::Utc;

    fn product(cnpj: &str, name: &str, active: bool) -> Product {
        Product {
            id: String::new(),
            cnpj: TenantKey::normalize(cnpj),
            local_id: Some("web_1".to_string()),
            origin: "web".to_string(),
            code: None,
            name: name.to_string(),
            category: None,
            unit: "UN".to_string(),
            stock: 0.0,
            pricing: ProductPricing::default(),
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn products_are_tenant_scoped_and_name_ordered() {
        let store = MemoryStore::new();
        let a = TenantKey::normalize("11111111000111");
        store.insert_product(&product("11111111000111", "FEIJAO", true)).unwrap();
        store.insert_product(&product("11111111000111", "ARROZ", true)).unwrap();
        store.insert_product(&product("22222222000122", "CAFE", true)).unwrap();

        let rows = store.list_products(&a, true).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "ARROZ");
        assert_eq!(rows[1].name, "FEIJAO");
    }

    #[test]
    fn active_only_listing_excludes_inactive() {
        let store = MemoryStore::new();
        let a = TenantKey::normalize("11111111000111");
        store.insert_product(&product("11111111000111", "ARROZ", true)).unwrap();
        store.insert_product(&product("11111111000111", "FEIJAO", false)).unwrap();

        assert_eq!(store.list_products(&a, true).unwrap().len(), 1);
        assert_eq!(store.list_products(&a, false).unwrap().len(), 2);
        // Counts include inactive rows.
        assert_eq!(store.count_products(&a).unwrap(), 2);
    }

    #[test]
    fn insert_assigns_a_remote_id() {
        let store = MemoryStore::new();
        let stored = store
            .insert_product(&product("11111111000111", "ARROZ", true))
            .unwrap();
        assert!(!stored.id.is_empty());
    }

    #[test]
    fn update_of_unknown_id_is_an_error() {
        let store = MemoryStore::new();
        let mut row = product("11111111000111", "ARROZ", true);
        row.id = "missing".to_string();
        assert!(store.update_product(&row).is_err());
    }

    #[test]
    fn upsert_user_replaces_by_tenant_and_login() {
        let store = MemoryStore::new();
        let cnpj = TenantKey::normalize("11111111000111");
        let upsert = |name: &str, secret: &str| UserUpsert {
            cnpj: cnpj.clone(),
            login: "12345678901".to_string(),
            name: name.to_string(),
            secret: secret.to_string(),
            role: "admin".to_string(),
            email: None,
            origin: "web".to_string(),
            cpf: "12345678901".to_string(),
        };
        store.upsert_user(&upsert("MARIA", "old")).unwrap();
        let first = store.verify_user(&cnpj, "12345678901", "old").unwrap().unwrap();

        store.upsert_user(&upsert("MARIA SILVA", "new")).unwrap();
        assert!(store.verify_user(&cnpj, "12345678901", "old").unwrap().is_none());
        let second = store.verify_user(&cnpj, "12345678901", "new").unwrap().unwrap();
        // Same identity, refreshed fields.
        assert_eq!(first.id, second.id);
        assert_eq!(second.display_name, "MARIA SILVA");
    }
}
