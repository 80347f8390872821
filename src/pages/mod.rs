//! Headless page controllers.
//!
//! One controller per screen of the back office: it owns the screen's state
//! (form fields as typed, busy flags, inline error message), consults the
//! page guard where the screen is tenant-protected, and calls the domain
//! services. Rendering and event plumbing belong to whatever shell hosts
//! these controllers.
//!
//! Failures of user-triggered actions are converted to the inline message
//! right here and never escape; list loads degrade to an empty list.

pub mod customers;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod products;
pub mod register;

pub use customers::{CustomerForm, CustomersPage};
pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use products::{ProductForm, ProductsPage};
pub use register::{RegisterPage, RegisterStep};

use crate::domain::BackofficeError;

/// Inline message shown for a failed action, in the product's language.
pub(crate) fn user_message(err: &BackofficeError) -> String {
    match err {
        BackofficeError::CompanyNotFound => "Empresa não encontrada".to_string(),
        BackofficeError::InvalidCredentials => "CPF ou senha incorretos".to_string(),
        BackofficeError::InvalidInput(message) => message.clone(),
        BackofficeError::Store(_) => "Erro ao comunicar com o servidor".to_string(),
    }
}
