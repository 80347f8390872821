//! Catalog record editor.

use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::products::SaveProductCommand;
use crate::domain::error::{BackofficeError, Result};
use crate::domain::models::{Product, ProductPricing};
use crate::domain::pricing::{round2, PriceDriver, PricingEdit};
use crate::domain::tenant::TenantKey;
use crate::storage::traits::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Products of one tenant, ordered by name.
    pub fn list(&self, tenant: &TenantKey, active_only: bool) -> Result<Vec<Product>> {
        Ok(self.products.list_products(tenant, active_only)?)
    }

    /// Insert or update, never both. Pricing passes through the derivation
    /// driven by the last-edited field before anything is persisted.
    pub fn save(&self, command: SaveProductCommand) -> Result<Product> {
        if command.name.trim().is_empty() {
            return Err(BackofficeError::InvalidInput(
                "Informe o nome do produto".to_string(),
            ));
        }
        let pricing = resolve_pricing(&command)?;
        let now = Utc::now();

        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let name = command.name.trim().to_uppercase();
        let category = optional(&command.category).map(|v| v.to_uppercase());
        let code = optional(&command.code);

        match &command.id {
            None => {
                if !command.tenant.is_complete() {
                    return Err(BackofficeError::InvalidInput(
                        "CNPJ deve ter 14 dígitos".to_string(),
                    ));
                }
                let product = Product {
                    id: String::new(),
                    cnpj: command.tenant.clone(),
                    local_id: Some(format!("web_{}", now.timestamp_millis())),
                    origin: "web".to_string(),
                    code,
                    name,
                    category,
                    unit: command.unit.clone(),
                    stock: command.stock,
                    pricing,
                    active: true,
                    created_at: now,
                    updated_at: now,
                };
                let stored = self.products.insert_product(&product)?;
                info!("created product {} ({})", stored.name, stored.id);
                Ok(stored)
            }
            Some(id) => {
                let mut product = self
                    .products
                    .find_product(&command.tenant, id)?
                    .ok_or_else(|| {
                        warn!("product {} not found for tenant {}", id, command.tenant);
                        BackofficeError::Store(anyhow::anyhow!("produto {id} não encontrado"))
                    })?;
                product.code = code;
                product.name = name;
                product.category = category;
                product.unit = command.unit.clone();
                product.stock = command.stock;
                product.pricing = pricing;
                product.updated_at = now;
                self.products.update_product(&product)?;
                info!("updated product {} ({})", product.name, product.id);
                Ok(product)
            }
        }
    }

    /// Mark the record inactive; it leaves the default listings but is never
    /// erased.
    pub fn soft_delete(&self, tenant: &TenantKey, id: &str) -> Result<()> {
        let mut product = self.products.find_product(tenant, id)?.ok_or_else(|| {
            BackofficeError::Store(anyhow::anyhow!("produto {id} não encontrado"))
        })?;
        product.active = false;
        product.updated_at = Utc::now();
        self.products.update_product(&product)?;
        info!("deactivated product {} ({})", product.name, product.id);
        Ok(())
    }
}

/// Run the single driver-tagged recomputation and round everything that gets
/// persisted.
fn resolve_pricing(command: &SaveProductCommand) -> Result<ProductPricing> {
    if let (Some(start), Some(end)) = (command.promotion_start, command.promotion_end) {
        if start > end {
            return Err(BackofficeError::InvalidInput(
                "Período promocional inválido".to_string(),
            ));
        }
    }

    let mut edit = PricingEdit::new(
        round2(command.cost_price),
        command.margin_percent.map(round2),
        round2(command.sale_price),
    );
    if let Some(driver) = command.price_driver {
        match driver {
            PriceDriver::Cost => edit.apply(driver, command.cost_price),
            // A cleared margin field drives nothing; the submitted fields
            // stand as-is, margin stays blank.
            PriceDriver::Margin => {
                if let Some(margin) = command.margin_percent {
                    edit.apply(driver, margin);
                }
            }
            PriceDriver::SalePrice => edit.apply(driver, command.sale_price),
        }
    }

    Ok(ProductPricing {
        cost_price: edit.cost,
        margin_percent: edit.margin_percent,
        sale_price: edit.sale_price,
        promotion_active: command.promotion_active,
        promotional_price: command.promotional_price.map(round2),
        promotion_start: command.promotion_start,
        promotion_end: command.promotion_end,
    })
}
