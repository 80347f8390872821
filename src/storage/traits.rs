//! Remote data store interface.
//!
//! The back office talks to a remote relational store it does not own. These
//! traits abstract the row-scoped queries against the tenant-owned relations
//! (`empresas`, `produtos`, `clientes`, `vendas`) and the two
//! authentication-adjacent stored procedures, so the domain layer works the
//! same against the real store and the in-memory stand-in used by tests.
//!
//! Every tenant-owned operation is filtered by the normalized tenant key;
//! the caller passes it explicitly, it is never inferred from ambient state.

use anyhow::Result;

use crate::domain::models::{Company, Customer, Product, UserRecord};
use crate::domain::tenant::TenantKey;

/// `empresas` relation.
pub trait CompanyStore: Send + Sync {
    /// Existence check and display data for a tenant key.
    fn find_company(&self, cnpj: &TenantKey) -> Result<Option<Company>>;
}

/// `vendas` relation. Sales flows belong to the point-of-sale clients; the
/// back office only shows the per-tenant count on the dashboard.
pub trait SaleStore: Send + Sync {
    fn count_sales(&self, cnpj: &TenantKey) -> Result<u64>;
}

/// Input to the user-upsert registration procedure.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub cnpj: TenantKey,
    pub login: String,
    pub name: String,
    pub secret: String,
    pub role: String,
    pub email: Option<String>,
    pub origin: String,
    pub cpf: String,
}

/// The two stored procedures the client trusts for credential handling.
///
/// Credential verification is deliberately isolated here: throttling or
/// lockout can wrap this trait without touching any caller.
pub trait AuthStore: Send + Sync {
    /// `verificar_usuario`: verifies a login/secret pair against a tenant,
    /// returning the user row or nothing.
    fn verify_user(
        &self,
        cnpj: &TenantKey,
        login: &str,
        secret: &str,
    ) -> Result<Option<UserRecord>>;

    /// `upsert_empresa`: registration half one.
    fn upsert_company(&self, company: &Company) -> Result<()>;

    /// `upsert_usuario`: registration half two.
    fn upsert_user(&self, user: &UserUpsert) -> Result<()>;
}

/// `produtos` relation.
pub trait ProductStore: Send + Sync {
    /// Products of one tenant, ordered by name. `active_only` excludes
    /// soft-deleted records.
    fn list_products(&self, cnpj: &TenantKey, active_only: bool) -> Result<Vec<Product>>;

    fn find_product(&self, cnpj: &TenantKey, id: &str) -> Result<Option<Product>>;

    /// Insert a new row; the store assigns the remote `id` (the input id is
    /// ignored) and the stored row is returned.
    fn insert_product(&self, product: &Product) -> Result<Product>;

    /// Update an existing row by its remote id.
    fn update_product(&self, product: &Product) -> Result<()>;

    /// Per-tenant row count, inactive records included.
    fn count_products(&self, cnpj: &TenantKey) -> Result<u64>;
}

/// `clientes` relation.
pub trait CustomerStore: Send + Sync {
    fn list_customers(&self, cnpj: &TenantKey, active_only: bool) -> Result<Vec<Customer>>;

    fn find_customer(&self, cnpj: &TenantKey, id: &str) -> Result<Option<Customer>>;

    fn insert_customer(&self, customer: &Customer) -> Result<Customer>;

    fn update_customer(&self, customer: &Customer) -> Result<()>;

    /// Per-tenant row count, inactive records included.
    fn count_customers(&self, cnpj: &TenantKey) -> Result<u64>;
}
