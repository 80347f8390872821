use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::tenant::TenantKey;

/// A catalog item (`produtos` relation), always scoped to one tenant.
///
/// Deletion is a soft delete: `active` flips to `false` and the record stays
/// in the store, excluded from default listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Remote identifier, assigned by the store on insert.
    pub id: String,
    pub cnpj: TenantKey,
    /// Client-generated temporary identifier carried by web-originated
    /// inserts until the remote id exists (`web_{unix_millis}`).
    pub local_id: Option<String>,
    /// Which front end created the record (`web` here; the desktop client
    /// writes its own tag).
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "codigo")]
    pub code: Option<String>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "unidade")]
    pub unit: String,
    #[serde(rename = "estoque_atual")]
    pub stock: f64,
    #[serde(flatten)]
    pub pricing: ProductPricing,
    #[serde(rename = "ativo")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pricing subset of a catalog item.
///
/// Outside an edit, `sale_price == cost_price * (1 + margin/100)` up to cent
/// rounding unless the sale price was edited directly, in which case the
/// margin holds the derived value instead (or is blank when cost is zero).
/// Promotional fields only matter while `promotion_active` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricing {
    #[serde(rename = "preco_custo")]
    pub cost_price: f64,
    #[serde(rename = "margem_lucro")]
    pub margin_percent: Option<f64>,
    #[serde(rename = "preco_venda")]
    pub sale_price: f64,
    #[serde(rename = "promocao_ativa")]
    pub promotion_active: bool,
    #[serde(rename = "preco_promocional")]
    pub promotional_price: Option<f64>,
    #[serde(rename = "promocao_inicio")]
    pub promotion_start: Option<DateTime<Utc>>,
    #[serde(rename = "promocao_fim")]
    pub promotion_end: Option<DateTime<Utc>>,
}

impl Default for ProductPricing {
    fn default() -> Self {
        Self {
            cost_price: 0.0,
            margin_percent: Some(0.0),
            sale_price: 0.0,
            promotion_active: false,
            promotional_price: None,
            promotion_start: None,
            promotion_end: None,
        }
    }
}
