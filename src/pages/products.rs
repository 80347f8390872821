//! Product catalog page: guarded listing, search, and the pricing form.

use chrono::{DateTime, NaiveDate, Utc};
use log::error;

use crate::domain::commands::products::SaveProductCommand;
use crate::domain::models::Product;
use crate::domain::pricing::{self, PriceDriver, PricingEdit};
use crate::domain::tenant::TenantKey;
use crate::domain::{GuardState, PageGuard, ProductService};
use crate::pages::user_message;
use crate::storage::SessionStore;

/// Editor state for one product. Numeric fields are kept as the raw text the
/// user typed; the pricing trio recomputes on every keystroke, driven by
/// whichever field was edited last.
pub struct ProductForm {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: String,
    pub cost_price: String,
    pub margin_percent: String,
    pub sale_price: String,
    pub promotion_active: bool,
    pub promotional_price: String,
    /// Dates as `YYYY-MM-DD`; empty means no bound on that side.
    pub promotion_start: String,
    pub promotion_end: String,
    driver: Option<PriceDriver>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            id: None,
            code: String::new(),
            name: String::new(),
            category: String::new(),
            unit: "UN".to_string(),
            stock: "0".to_string(),
            cost_price: "0.00".to_string(),
            margin_percent: "0.00".to_string(),
            sale_price: "0.00".to_string(),
            promotion_active: false,
            promotional_price: String::new(),
            promotion_start: String::new(),
            promotion_end: String::new(),
            driver: None,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            code: product.code.clone().unwrap_or_default(),
            name: product.name.clone(),
            category: product.category.clone().unwrap_or_default(),
            unit: product.unit.clone(),
            stock: format!("{}", product.stock),
            cost_price: format!("{:.2}", product.pricing.cost_price),
            margin_percent: product
                .pricing
                .margin_percent
                .map(|m| format!("{m:.2}"))
                .unwrap_or_default(),
            sale_price: format!("{:.2}", product.pricing.sale_price),
            promotion_active: product.pricing.promotion_active,
            promotional_price: product
                .pricing
                .promotional_price
                .map(|p| format!("{p:.2}"))
                .unwrap_or_default(),
            promotion_start: date_field(product.pricing.promotion_start),
            promotion_end: date_field(product.pricing.promotion_end),
            driver: None,
        }
    }

    fn parsed(&self) -> (f64, Option<f64>, f64) {
        let margin = self.margin_percent.trim();
        (
            self.cost_price.trim().parse().unwrap_or(0.0),
            if margin.is_empty() {
                None
            } else {
                Some(margin.parse().unwrap_or(0.0))
            },
            self.sale_price.trim().parse().unwrap_or(0.0),
        )
    }

    /// Cost keystroke: the sale price follows when a margin is present.
    pub fn set_cost_price(&mut self, raw: &str) {
        self.cost_price = raw.to_string();
        self.driver = Some(PriceDriver::Cost);
        let (cost, margin, price) = self.parsed();
        let mut edit = PricingEdit::new(cost, margin, price);
        edit.edit_cost(cost);
        self.sale_price = format!("{:.2}", edit.sale_price);
    }

    /// Margin keystroke: the sale price follows. Clearing the field leaves
    /// the price alone.
    pub fn set_margin_percent(&mut self, raw: &str) {
        self.margin_percent = raw.to_string();
        self.driver = Some(PriceDriver::Margin);
        if raw.trim().is_empty() {
            return;
        }
        let (cost, margin, price) = self.parsed();
        let mut edit = PricingEdit::new(cost, margin, price);
        edit.edit_margin(margin.unwrap_or(0.0));
        self.sale_price = format!("{:.2}", edit.sale_price);
    }

    /// Sale-price keystroke: the margin follows, or clears when the cost is
    /// zero and no margin can be derived.
    pub fn set_sale_price(&mut self, raw: &str) {
        self.sale_price = raw.to_string();
        self.driver = Some(PriceDriver::SalePrice);
        let (cost, margin, price) = self.parsed();
        let mut edit = PricingEdit::new(cost, margin, price);
        edit.edit_sale_price(price);
        self.margin_percent = edit
            .margin_percent
            .map(|m| format!("{m:.2}"))
            .unwrap_or_default();
    }

    fn command(&self, tenant: &TenantKey) -> SaveProductCommand {
        let (cost, margin, price) = self.parsed();
        let promo = self.promotional_price.trim();
        SaveProductCommand {
            tenant: tenant.clone(),
            id: self.id.clone(),
            code: Some(self.code.clone()),
            name: self.name.clone(),
            category: Some(self.category.clone()),
            unit: self.unit.trim().to_uppercase(),
            stock: self.stock.trim().parse().unwrap_or(0.0),
            cost_price: cost,
            margin_percent: margin,
            sale_price: price,
            price_driver: self.driver,
            promotion_active: self.promotion_active,
            promotional_price: if promo.is_empty() {
                None
            } else {
                Some(promo.parse().unwrap_or(0.0))
            },
            promotion_start: parse_date(&self.promotion_start, 0, 0, 0),
            promotion_end: parse_date(&self.promotion_end, 23, 59, 59),
        }
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

fn date_field(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn parse_date(raw: &str, hour: u32, min: u32, sec: u32) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .map(|d| d.and_utc())
}

pub struct ProductsPage {
    products: ProductService,
    sessions: SessionStore,
    guard: PageGuard,
    pub items: Vec<Product>,
    pub search: String,
    pub form: Option<ProductForm>,
    pub saving: bool,
    pub error: Option<String>,
}

impl ProductsPage {
    pub fn new(products: ProductService, sessions: SessionStore, tenant: TenantKey) -> Self {
        Self {
            products,
            sessions,
            guard: PageGuard::new(tenant),
            items: Vec::new(),
            search: String::new(),
            form: None,
            saving: false,
            error: None,
        }
    }

    /// Run the guard, then load the active catalog. Returns the login path
    /// when the guard denies entry.
    pub fn enter(&mut self) -> Option<String> {
        let session = self.sessions.active_session();
        if self.guard.check(session.as_ref()) == &GuardState::Redirecting {
            return self.guard.redirect_target();
        }
        self.reload();
        None
    }

    pub fn authorized(&self) -> bool {
        self.guard.state() == &GuardState::Authorized
    }

    /// Refresh the listing. A failed read degrades to an empty list with the
    /// inline error set.
    pub fn reload(&mut self) {
        match self.products.list(self.guard.tenant(), true) {
            Ok(items) => self.items = items,
            Err(err) => {
                error!("failed to list products: {err}");
                self.items = Vec::new();
                self.error = Some(user_message(&err));
            }
        }
    }

    /// Case-insensitive filter over name and code.
    pub fn filtered(&self) -> Vec<&Product> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.code
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Price shown on the listing, honoring an active promotion window.
    pub fn display_price(&self, product: &Product) -> f64 {
        pricing::effective_price(&product.pricing, Utc::now())
    }

    pub fn open_new(&mut self) {
        self.form = Some(ProductForm::new());
        self.error = None;
    }

    pub fn open_edit(&mut self, product: &Product) {
        self.form = Some(ProductForm::from_product(product));
        self.error = None;
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Persist the open form. Success closes it and refreshes the listing.
    pub fn save(&mut self) {
        if self.saving {
            return;
        }
        let Some(form) = &self.form else {
            return;
        };
        self.saving = true;
        self.error = None;

        let outcome = self.products.save(form.command(self.guard.tenant()));
        self.saving = false;
        match outcome {
            Ok(_) => {
                self.form = None;
                self.reload();
            }
            Err(err) => {
                error!("failed to save product: {err}");
                self.error = Some(user_message(&err));
            }
        }
    }

    /// Deactivate a product and refresh.
    pub fn delete(&mut self, id: &str) {
        if let Err(err) = self.products.soft_delete(self.guard.tenant(), id) {
            error!("failed to deactivate product {id}: {err}");
            self.error = Some(user_message(&err));
            return;
        }
        self.reload();
    }
}
