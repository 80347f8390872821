//! URL surface of the back office.
//!
//! The first path segment of every tenant-scoped page is the tenant key, in
//! whatever punctuated or raw form the user typed; it is normalized on use.
//! Unrecognized paths land on the tenant-selection page.

use crate::domain::tenant::TenantKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Tenant-selection landing page (`/`).
    Home,
    /// Company registration (`/registro`).
    Register,
    /// Tenant login (`/{cnpj}`).
    Login(TenantKey),
    /// Tenant dashboard (`/{cnpj}/dashboard`).
    Dashboard(TenantKey),
    /// Catalog editor (`/{cnpj}/produtos`).
    Products(TenantKey),
    /// Customer editor (`/{cnpj}/clientes`).
    Customers(TenantKey),
}

impl Route {
    /// Resolve a path to a route. Anything unrecognized falls back to the
    /// landing page, which is what the catch-all redirect did.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["registro"] => Route::Register,
            [cnpj] => Route::Login(TenantKey::normalize(cnpj)),
            [cnpj, "dashboard"] => Route::Dashboard(TenantKey::normalize(cnpj)),
            [cnpj, "produtos"] => Route::Products(TenantKey::normalize(cnpj)),
            [cnpj, "clientes"] => Route::Customers(TenantKey::normalize(cnpj)),
            _ => Route::Home,
        }
    }
}

pub fn login_path(tenant: &TenantKey) -> String {
    format!("/{}", tenant)
}

pub fn dashboard_path(tenant: &TenantKey) -> String {
    format!("/{}/dashboard", tenant)
}

pub fn products_path(tenant: &TenantKey) -> String {
    format!("/{}/produtos", tenant)
}

pub fn customers_path(tenant: &TenantKey) -> String {
    format!("/{}/clientes", tenant)
}
