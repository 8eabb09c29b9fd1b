//! Checkout form validation and simulated order placement.
//!
//! There is no payment processing. A valid form against a non-empty cart
//! produces an [`OrderConfirmation`] and empties the cart.

use chrono::{DateTime, Utc};
use proscience_core::Price;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, OrderSummary, PricingPolicy};
use crate::validation::ValidationErrors;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Paypal => "paypal",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit / debit card",
            Self::Paypal => "PayPal",
        }
    }
}

/// The checkout form as posted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub apartment: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub payment_method: PaymentMethod,
    pub card_number: String,
    pub card_name: String,
    pub card_expiry: String,
    pub card_cvc: String,
    /// Checkbox: present when billing matches shipping.
    pub same_as_shipping: Option<String>,
    pub billing_address: String,
    pub billing_city: String,
    pub billing_state: String,
    pub billing_zip_code: String,
}

impl CheckoutForm {
    /// A blank form as first shown: US shipping, card payment, billing same
    /// as shipping.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            same_as_shipping: Some("on".to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn billing_same_as_shipping(&self) -> bool {
        self.same_as_shipping.is_some()
    }

    #[must_use]
    pub const fn pays_by_card(&self) -> bool {
        matches!(self.payment_method, PaymentMethod::Card)
    }

    /// Check every field. An empty result means the form is acceptable.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        errors.require_email("email", &self.email);
        errors.require("first_name", &self.first_name, "First name is required");
        errors.require("last_name", &self.last_name, "Last name is required");
        errors.require("phone", &self.phone, "Phone is required");
        errors.require("address", &self.address, "Address is required");
        errors.require("city", &self.city, "City is required");
        errors.require("state", &self.state, "State is required");
        errors.require("zip_code", &self.zip_code, "ZIP code is required");

        if self.pays_by_card() {
            errors.require("card_number", &self.card_number, "Card number is required");
            errors.require("card_name", &self.card_name, "Cardholder name is required");
            errors.require("card_expiry", &self.card_expiry, "Expiry date is required");
            errors.require("card_cvc", &self.card_cvc, "CVC is required");
        }

        if !self.billing_same_as_shipping() {
            errors.require(
                "billing_address",
                &self.billing_address,
                "Billing address is required",
            );
            errors.require("billing_city", &self.billing_city, "Billing city is required");
            errors.require("billing_state", &self.billing_state, "Billing state is required");
            errors.require(
                "billing_zip_code",
                &self.billing_zip_code,
                "Billing ZIP code is required",
            );
        }

        errors
    }

    fn shipping_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} {}",
            self.first_name.trim(),
            self.last_name.trim()
        )];
        lines.push(self.address.trim().to_string());
        if !self.apartment.trim().is_empty() {
            lines.push(self.apartment.trim().to_string());
        }
        lines.push(format!(
            "{}, {} {}",
            self.city.trim(),
            self.state.trim(),
            self.zip_code.trim()
        ));
        let country = self.country.trim();
        lines.push(if country.is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            country.to_string()
        });
        lines
    }
}

const DEFAULT_COUNTRY: &str = "United States";

/// Why an order could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("checkout form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),
}

/// One purchased line as shown on the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl ConfirmedLine {
    #[must_use]
    pub fn line_total_display(&self) -> String {
        Price::usd(self.line_total).display()
    }
}

/// A placed order, kept in the session for the confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub email: String,
    pub shipping_address: Vec<String>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<ConfirmedLine>,
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

/// Validate `form`, then turn `cart` into an order and clear it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart and
/// [`CheckoutError::Invalid`] when the form fails validation. In both cases
/// the cart is left as it was.
pub fn place_order(
    cart: &mut Cart,
    form: &CheckoutForm,
    policy: &PricingPolicy,
    now: DateTime<Utc>,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CheckoutError::Invalid(errors));
    }

    let confirmation = OrderConfirmation {
        order_number: order_number(now, &mut rand::rng()),
        email: form.email.trim().to_string(),
        shipping_address: form.shipping_lines(),
        payment_method: form.payment_method,
        lines: cart
            .lines()
            .iter()
            .map(|line| ConfirmedLine {
                name: line.product.name.clone(),
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect(),
        summary: OrderSummary::for_cart(cart, policy),
        placed_at: now,
    };

    cart.clear();
    Ok(confirmation)
}

/// `PS-<yyyymmdd>-<6 digits>`.
fn order_number(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    format!(
        "PS-{}-{:06}",
        now.format("%Y%m%d"),
        rng.random_range(0..1_000_000_u32)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use proscience_core::Catalog;

    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            card_number: "4242424242424242".to_string(),
            card_name: "Jane Doe".to_string(),
            card_expiry: "12/30".to_string(),
            card_cvc: "123".to_string(),
            ..CheckoutForm::blank()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap()
    }

    fn cart_with_whey() -> Cart {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add_item(catalog.by_slug("whey-protein-isolate").unwrap(), 2)
            .unwrap();
        cart
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_blank_form_reports_required_fields() {
        let errors = CheckoutForm::blank().validate();
        for field in [
            "email",
            "first_name",
            "last_name",
            "phone",
            "address",
            "city",
            "state",
            "zip_code",
            "card_number",
            "card_name",
            "card_expiry",
            "card_cvc",
        ] {
            assert!(errors.has(field), "{field} should be required");
        }
        assert!(!errors.has("billing_address"));
        assert!(!errors.has("apartment"));
    }

    #[test]
    fn test_invalid_email() {
        let form = CheckoutForm {
            email: "jane at example".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().get("email"), "Email is invalid");
    }

    #[test]
    fn test_paypal_needs_no_card_fields() {
        let form = CheckoutForm {
            payment_method: PaymentMethod::Paypal,
            card_number: String::new(),
            card_name: String::new(),
            card_expiry: String::new(),
            card_cvc: String::new(),
            ..valid_form()
        };
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_separate_billing_requires_billing_fields() {
        let form = CheckoutForm {
            same_as_shipping: None,
            ..valid_form()
        };
        let errors = form.validate();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                "billing_address",
                "billing_city",
                "billing_state",
                "billing_zip_code"
            ]
        );
    }

    #[test]
    fn test_payment_method_deserializes_lowercase() {
        let method: PaymentMethod = serde_json::from_str("\"paypal\"").unwrap();
        assert_eq!(method, PaymentMethod::Paypal);
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut cart = cart_with_whey();
        let order = place_order(&mut cart, &valid_form(), &PricingPolicy::default(), now())
            .unwrap();

        assert!(cart.is_empty());
        assert!(order.order_number.starts_with("PS-20240506-"));
        assert_eq!(order.order_number.len(), "PS-20240506-000000".len());
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].quantity, 2);
        // 2 x 54.99 = 109.98, free shipping, tax 8.80
        assert_eq!(order.summary.subtotal, Decimal::new(10998, 2));
        assert!(order.summary.is_free_shipping());
        assert_eq!(order.summary.tax, Decimal::new(880, 2));
        assert_eq!(order.summary.total, Decimal::new(11878, 2));
        assert_eq!(order.shipping_address[0], "Jane Doe");
        assert_eq!(order.shipping_address.last().unwrap(), "United States");
    }

    #[test]
    fn test_place_order_rejects_empty_cart() {
        let mut cart = Cart::new();
        assert_eq!(
            place_order(&mut cart, &valid_form(), &PricingPolicy::default(), now()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_invalid_form_keeps_cart() {
        let mut cart = cart_with_whey();
        let result = place_order(
            &mut cart,
            &CheckoutForm::blank(),
            &PricingPolicy::default(),
            now(),
        );
        assert!(matches!(result, Err(CheckoutError::Invalid(_))));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_order_number_is_zero_padded() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let number = order_number(now(), &mut rng);
        let suffix = number.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }
}
