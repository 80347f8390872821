//! Tenant lookup, the recently-accessed list and dashboard figures.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::error::{BackofficeError, Result};
use crate::domain::models::Company;
use crate::domain::tenant::TenantKey;
use crate::storage::traits::{CompanyStore, CustomerStore, ProductStore, SaleStore};
use crate::storage::SessionStore;

/// Per-tenant record counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub products: u64,
    pub customers: u64,
    pub sales: u64,
}

#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyStore>,
    products: Arc<dyn ProductStore>,
    customers: Arc<dyn CustomerStore>,
    sales: Arc<dyn SaleStore>,
    sessions: SessionStore,
}

impl CompanyService {
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        products: Arc<dyn ProductStore>,
        customers: Arc<dyn CustomerStore>,
        sales: Arc<dyn SaleStore>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            companies,
            products,
            customers,
            sales,
            sessions,
        }
    }

    /// Resolve a user-entered tenant key to a registered company. Requires a
    /// complete key; success records the tenant in the recently-accessed
    /// list.
    pub fn lookup(&self, raw_cnpj: &str) -> Result<Company> {
        let tenant = TenantKey::normalize(raw_cnpj);
        if !tenant.is_complete() {
            return Err(BackofficeError::InvalidInput(
                "CNPJ deve ter 14 dígitos".to_string(),
            ));
        }

        let company = self.companies.find_company(&tenant)?.ok_or_else(|| {
            warn!("tenant {} not registered", tenant);
            BackofficeError::CompanyNotFound
        })?;

        self.sessions
            .upsert_recent_tenant(&tenant, company.display_name())?;
        info!("tenant {} resolved to {}", tenant, company.display_name());
        Ok(company)
    }

    /// Display data for a page header. Tolerant read: an unknown tenant is
    /// `None`, not an error, so the login page can render without a name.
    pub fn company_header(&self, tenant: &TenantKey) -> Result<Option<Company>> {
        Ok(self.companies.find_company(tenant)?)
    }

    /// Refresh a saved tenant's last access when it is reopened from the
    /// landing page.
    pub fn touch_recent(&self, tenant: &TenantKey) -> Result<()> {
        if let Some(entry) = self
            .sessions
            .recent_tenants()
            .into_iter()
            .find(|entry| &entry.tenant == tenant)
        {
            self.sessions.upsert_recent_tenant(tenant, &entry.name)?;
        }
        Ok(())
    }

    pub fn remove_recent(&self, tenant: &TenantKey) -> Result<()> {
        self.sessions.remove_recent_tenant(tenant)?;
        Ok(())
    }

    /// Per-tenant record counts. Inactive records count too; the figures
    /// describe the whole store, not the default listings.
    pub fn dashboard_stats(&self, tenant: &TenantKey) -> Result<DashboardStats> {
        Ok(DashboardStats {
            products: self.products.count_products(tenant)?,
            customers: self.customers.count_customers(tenant)?,
            sales: self.sales.count_sales(tenant)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AuthStore, MemoryKeyValueStore, MemoryStore};

    fn setup() -> (CompanyService, Arc<MemoryStore>, SessionStore) {
        let store = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        let service = CompanyService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            sessions.clone(),
        );
        (service, store, sessions)
    }

    fn seed_company(store: &MemoryStore, cnpj: &str, trade_name: Option<&str>) {
        store
            .upsert_company(&Company {
                cnpj: TenantKey::normalize(cnpj),
                legal_name: "MERCADO LITORAL LTDA".to_string(),
                trade_name: trade_name.map(str::to_string),
                city: None,
                state: None,
                phone: None,
                email: None,
                origin: "web".to_string(),
            })
            .unwrap();
    }

    #[test]
    fn lookup_requires_complete_cnpj() {
        let (service, _, _) = setup();
        assert!(matches!(
            service.lookup("123"),
            Err(BackofficeError::InvalidInput(_))
        ));
    }

    #[test]
    fn lookup_unknown_tenant_is_not_found() {
        let (service, _, sessions) = setup();
        assert!(matches!(
            service.lookup("12345678000195"),
            Err(BackofficeError::CompanyNotFound)
        ));
        assert!(sessions.recent_tenants().is_empty());
    }

    #[test]
    fn lookup_saves_the_tenant_under_its_display_name() {
        let (service, store, sessions) = setup();
        seed_company(&store, "12345678000195", Some("MERCADO DO LITORAL"));

        let company = service.lookup("12.345.678/0001-95").unwrap();
        assert_eq!(company.display_name(), "MERCADO DO LITORAL");

        let recent = sessions.recent_tenants();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "MERCADO DO LITORAL");
    }

    #[test]
    fn display_name_falls_back_to_legal_name() {
        let (service, store, _) = setup();
        seed_company(&store, "12345678000195", None);
        let company = service.lookup("12345678000195").unwrap();
        assert_eq!(company.display_name(), "MERCADO LITORAL LTDA");
    }

    #[test]
    fn company_header_is_tolerant_of_unknown_tenants() {
        let (service, _, _) = setup();
        let header = service
            .company_header(&TenantKey::normalize("12345678000195"))
            .unwrap();
        assert!(header.is_none());
    }

    #[test]
    fn dashboard_stats_count_per_tenant() {
        let (service, store, _) = setup();
        let tenant = TenantKey::normalize("12345678000195");
        seed_company(&store, "12345678000195", None);
        store.record_sale(&tenant);
        store.record_sale(&tenant);
        store.record_sale(&TenantKey::normalize("99999999000199"));

        let stats = service.dashboard_stats(&tenant).unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                products: 0,
                customers: 0,
                sales: 2
            }
        );
    }
}
