//! Back-office core of the ML PDV web client.
//!
//! The crate is split in three layers:
//!
//! - [`storage`]: the remote relational store behind traits, an in-memory
//!   stand-in for tests, and the browser-local key-value state (session,
//!   saved companies, remembered credentials).
//! - [`domain`]: tenant identity, the pricing triangle, the session guard
//!   and the services behind each screen.
//! - [`pages`]: one headless controller per screen, holding form state and
//!   translating failures into inline messages.
//!
//! [`Backoffice`] wires the three together from a set of store handles and
//! hands out page controllers by URL.

pub mod domain;
pub mod pages;
pub mod storage;

use std::sync::Arc;

use domain::{
    AuthService, CompanyService, CustomerService, ProductService, Route, TenantKey,
};
use pages::{
    CustomersPage, DashboardPage, HomePage, LoginPage, ProductsPage, RegisterPage,
};
use storage::{
    AuthStore, CompanyStore, CustomerStore, KeyValueStore, MemoryKeyValueStore, MemoryStore,
    ProductStore, SaleStore, SessionStore,
};

/// A screen controller, picked by URL.
pub enum Page {
    Home(HomePage),
    Register(RegisterPage),
    Login(LoginPage),
    Dashboard(DashboardPage),
    Products(ProductsPage),
    Customers(CustomersPage),
}

/// The wired application: every service sharing the same store handles and
/// the same local key-value state.
#[derive(Clone)]
pub struct Backoffice {
    pub sessions: SessionStore,
    pub auth: AuthService,
    pub companies: CompanyService,
    pub products: ProductService,
    pub customers: CustomerService,
}

impl Backoffice {
    pub fn new(
        companies: Arc<dyn CompanyStore>,
        auth: Arc<dyn AuthStore>,
        products: Arc<dyn ProductStore>,
        customers: Arc<dyn CustomerStore>,
        sales: Arc<dyn SaleStore>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let sessions = SessionStore::new(kv);
        Self {
            auth: AuthService::new(auth, sessions.clone()),
            companies: CompanyService::new(
                companies,
                products.clone(),
                customers.clone(),
                sales,
                sessions.clone(),
            ),
            products: ProductService::new(products),
            customers: CustomerService::new(customers),
            sessions,
        }
    }

    /// Fully in-memory wiring, for tests and demos. Returns the store handle
    /// so callers can seed and inspect it.
    pub fn in_memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let backoffice = Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(MemoryKeyValueStore::new()),
        );
        (backoffice, store)
    }

    /// Controller for the screen a URL path resolves to. Unknown paths land
    /// on the home screen, like the router's catch-all.
    pub fn open(&self, path: &str) -> Page {
        match Route::parse(path) {
            Route::Home => Page::Home(self.home_page()),
            Route::Register => Page::Register(self.register_page()),
            Route::Login(tenant) => Page::Login(self.login_page(tenant)),
            Route::Dashboard(tenant) => Page::Dashboard(self.dashboard_page(tenant)),
            Route::Products(tenant) => Page::Products(self.products_page(tenant)),
            Route::Customers(tenant) => Page::Customers(self.customers_page(tenant)),
        }
    }

    pub fn home_page(&self) -> HomePage {
        HomePage::new(self.companies.clone(), self.sessions.clone())
    }

    pub fn register_page(&self) -> RegisterPage {
        RegisterPage::new(self.auth.clone())
    }

    pub fn login_page(&self, tenant: TenantKey) -> LoginPage {
        LoginPage::new(
            self.auth.clone(),
            self.companies.clone(),
            &self.sessions,
            tenant,
        )
    }

    pub fn dashboard_page(&self, tenant: TenantKey) -> DashboardPage {
        DashboardPage::new(
            self.companies.clone(),
            self.auth.clone(),
            self.sessions.clone(),
            tenant,
        )
    }

    pub fn products_page(&self, tenant: TenantKey) -> ProductsPage {
        ProductsPage::new(self.products.clone(), self.sessions.clone(), tenant)
    }

    pub fn customers_page(&self, tenant: TenantKey) -> CustomersPage {
        CustomersPage::new(self.customers.clone(), self.sessions.clone(), tenant)
    }
}
