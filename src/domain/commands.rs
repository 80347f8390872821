//! Command and result types used by the domain services. Page controllers
//! build these from form state; services validate and execute them.

pub mod auth {
    use crate::domain::models::Session;
    use crate::domain::tenant::TenantKey;

    /// Input for the login flow. `tenant` comes from the page URL, already
    /// normalized; `login` and `secret` come from the form as typed.
    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub tenant: TenantKey,
        pub login: String,
        pub secret: String,
        /// Remember-me choice: `true` fills the tenant's credential slot,
        /// `false` clears it.
        pub remember: bool,
    }

    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub session: Session,
    }

    /// Input for the two-step company + administrator registration.
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub cnpj: String,
        pub legal_name: String,
        pub trade_name: String,
        pub city: String,
        pub state: String,
        pub phone: String,
        pub email: String,
        pub admin_name: String,
        pub admin_cpf: String,
        pub password: String,
        pub password_confirmation: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterResult {
        /// Where the freshly registered tenant logs in.
        pub tenant: TenantKey,
    }
}

pub mod products {
    use chrono::{DateTime, Utc};

    use crate::domain::pricing::PriceDriver;
    use crate::domain::tenant::TenantKey;

    /// Save a catalog item: insert when `id` is `None`, update otherwise,
    /// never both.
    #[derive(Debug, Clone)]
    pub struct SaveProductCommand {
        pub tenant: TenantKey,
        pub id: Option<String>,
        pub code: Option<String>,
        pub name: String,
        pub category: Option<String>,
        pub unit: String,
        pub stock: f64,
        pub cost_price: f64,
        pub margin_percent: Option<f64>,
        pub sale_price: f64,
        /// Which pricing field the user edited last; drives the single
        /// derived recomputation before persisting. `None` keeps the fields
        /// as submitted.
        pub price_driver: Option<PriceDriver>,
        pub promotion_active: bool,
        pub promotional_price: Option<f64>,
        pub promotion_start: Option<DateTime<Utc>>,
        pub promotion_end: Option<DateTime<Utc>>,
    }
}

pub mod customers {
    use crate::domain::tenant::TenantKey;

    /// Save a customer: insert when `id` is `None`, update otherwise.
    /// Free-text fields are passed as typed; the service upper-cases the
    /// name and digit-normalizes the identifier fields.
    #[derive(Debug, Clone)]
    pub struct SaveCustomerCommand {
        pub tenant: TenantKey,
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
}
