//! Product pricing derivations.
//!
//! Cost, margin and sale price form a triangle where whichever field the user
//! last edited (the driver) determines which of the other two is recomputed.
//! Exactly one derived recomputation happens per edit; derivations never
//! cascade. The promotional price is an independent overlay with a validity
//! window.

use chrono::{DateTime, Utc};

use crate::domain::models::product::ProductPricing;

/// Round a monetary or percentage value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `cost * (1 + margin/100)`, rounded to cents.
pub fn sale_price_from_cost_and_margin(cost: f64, margin_percent: f64) -> f64 {
    round2(cost * (1.0 + margin_percent / 100.0))
}

/// Margin implied by a cost/price pair. `None` when `cost <= 0`: an unset
/// margin must stay blank, a false `0` would misrepresent it.
pub fn margin_from_cost_and_price(cost: f64, price: f64) -> Option<f64> {
    if cost > 0.0 {
        Some(round2((price - cost) / cost * 100.0))
    } else {
        None
    }
}

/// Which pricing field the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDriver {
    Cost,
    Margin,
    SalePrice,
}

/// Edit-time state of the pricing triangle.
///
/// Margin is optional: it is blank while cost is zero and the user edits the
/// sale price directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEdit {
    pub cost: f64,
    pub margin_percent: Option<f64>,
    pub sale_price: f64,
}

impl PricingEdit {
    pub fn new(cost: f64, margin_percent: Option<f64>, sale_price: f64) -> Self {
        Self {
            cost,
            margin_percent,
            sale_price,
        }
    }

    /// Cost changed: sale price is re-derived from the current margin.
    /// Margin itself is left alone, it stays the complement of the driver.
    pub fn edit_cost(&mut self, cost: f64) {
        self.cost = cost;
        if let Some(margin) = self.margin_percent {
            self.sale_price = sale_price_from_cost_and_margin(cost, margin);
        }
    }

    /// Margin changed: sale price is re-derived from the current cost.
    pub fn edit_margin(&mut self, margin_percent: f64) {
        self.margin_percent = Some(round2(margin_percent));
        self.sale_price = sale_price_from_cost_and_margin(self.cost, margin_percent);
    }

    /// Sale price edited directly: margin is re-derived from the current
    /// cost, or blanked when cost cannot support a margin.
    pub fn edit_sale_price(&mut self, sale_price: f64) {
        self.sale_price = round2(sale_price);
        self.margin_percent = margin_from_cost_and_price(self.cost, sale_price);
    }

    /// Apply one tagged edit. Convenience for callers that carry the driver
    /// and the new value separately (form submissions).
    pub fn apply(&mut self, driver: PriceDriver, value: f64) {
        match driver {
            PriceDriver::Cost => self.edit_cost(value),
            PriceDriver::Margin => self.edit_margin(value),
            PriceDriver::SalePrice => self.edit_sale_price(value),
        }
    }
}

/// Price a sale would use at `now`: the promotional price while the promotion
/// is active and inside its window, the regular sale price otherwise. A
/// missing window bound leaves that side open.
pub fn effective_price(pricing: &ProductPricing, now: DateTime<Utc>) -> f64 {
    if !pricing.promotion_active {
        return pricing.sale_price;
    }
    let Some(promotional) = pricing.promotional_price else {
        return pricing.sale_price;
    };
    let started = pricing.promotion_start.map_or(true, |start| start <= now);
    let not_ended = pricing.promotion_end.map_or(true, |end| now <= end);
    if started && not_ended {
        promotional
    } else {
        pricing.sale_price
    }
}

/// Discount the promotion represents, as a percentage of the sale price.
/// Only meaningful when the sale price is positive.
pub fn discount_percent(sale_price: f64, promotional_price: f64) -> Option<f64> {
    if sale_price > 0.0 {
        Some(round2((sale_price - promotional_price) / sale_price * 100.0))
    } else {
        None
    }
}
