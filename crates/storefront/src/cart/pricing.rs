//! Order pricing: shipping, tax and totals for a cart subtotal.

use proscience_core::{Price, round_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Cart;

/// Shipping and tax rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Shipping charged otherwise.
    pub flat_shipping: Decimal,
    /// Sales tax as a fraction (0.08 is 8%).
    pub tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::new(5000, 2),
            flat_shipping: Decimal::new(999, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

impl PricingPolicy {
    /// Shipping for a subtotal.
    #[must_use]
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal > self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// Tax for a subtotal, rounded to cents.
    #[must_use]
    pub fn tax_for(&self, subtotal: Decimal) -> Decimal {
        round_cents(subtotal * self.tax_rate)
    }

    /// Tax rate as a whole-number percentage for labels ("8").
    #[must_use]
    pub fn tax_percent_label(&self) -> String {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize().to_string()
    }
}

/// Subtotal, shipping, tax and grand total of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// How much more would unlock free shipping. `None` once it is free.
    pub amount_to_free_shipping: Option<Decimal>,
}

impl OrderSummary {
    /// Price a subtotal under `policy`.
    ///
    /// An empty cart still reports the flat shipping fee; the checkout page is
    /// never shown for one.
    #[must_use]
    pub fn compute(subtotal: Decimal, policy: &PricingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        let tax = policy.tax_for(subtotal);
        let amount_to_free_shipping = (!shipping.is_zero())
            .then(|| policy.free_shipping_threshold - subtotal)
            .filter(|remaining| remaining.is_sign_positive());

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            amount_to_free_shipping,
        }
    }

    /// Price a cart's current contents.
    #[must_use]
    pub fn for_cart(cart: &Cart, policy: &PricingPolicy) -> Self {
        Self::compute(cart.total_price(), policy)
    }

    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    #[must_use]
    pub fn subtotal_display(&self) -> String {
        Price::usd(self.subtotal).display()
    }

    /// "FREE" when shipping is waived.
    #[must_use]
    pub fn shipping_display(&self) -> String {
        if self.is_free_shipping() {
            "FREE".to_string()
        } else {
            Price::usd(self.shipping).display()
        }
    }

    #[must_use]
    pub fn tax_display(&self) -> String {
        Price::usd(self.tax).display()
    }

    #[must_use]
    pub fn total_display(&self) -> String {
        Price::usd(self.total).display()
    }
}
