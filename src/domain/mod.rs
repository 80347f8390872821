//! Domain layer: tenant identity, pricing derivations, session gating and
//! the services behind each screen.

pub mod auth_service;
pub mod commands;
pub mod company_service;
pub mod customer_service;
pub mod error;
pub mod guard;
pub mod models;
pub mod pricing;
pub mod product_service;
pub mod routes;
pub mod tenant;

pub use auth_service::AuthService;
pub use company_service::{CompanyService, DashboardStats};
pub use customer_service::CustomerService;
pub use error::{BackofficeError, Result};
pub use guard::{GuardState, PageGuard};
pub use product_service::ProductService;
pub use routes::Route;
pub use tenant::TenantKey;
