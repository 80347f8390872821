//! Domain models.
//!
//! Serialized field names follow the remote store's column names and the
//! persisted browser blobs (Portuguese), while the Rust structs stay in
//! English.

pub mod company;
pub mod customer;
pub mod product;
pub mod session;

pub use company::Company;
pub use customer::Customer;
pub use product::{Product, ProductPricing};
pub use session::{RecentTenantEntry, RememberedCredential, Session, UserRecord};
