//! Payment request metadata forwarded to the hosted page.

use serde::{Deserialize, Serialize};

/// A payment request displayed by a portal.
///
/// Immutable once handed to [`GPayPortal`](crate::portal::GPayPortal).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount to pay.
    pub amount: f64,
    /// Username of the requesting merchant.
    pub requester_username: String,
    /// Merchant-side request identifier.
    pub request_id: String,
    /// Merchant-side request timestamp, passed through verbatim.
    pub request_time: String,
}

impl PaymentRequest {
    /// Create a new payment request.
    pub fn new(
        amount: f64,
        requester_username: impl Into<String>,
        request_id: impl Into<String>,
        request_time: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            requester_username: requester_username.into(),
            request_id: request_id.into(),
            request_time: request_time.into(),
        }
    }

    /// The amount as sent in the `amount` query parameter.
    pub fn amount_string(&self) -> String {
        format_amount(self.amount)
    }
}

/// Render an amount the way the mobile platforms print a double.
///
/// Whole numbers keep one decimal (`100.0`), very large or very small
/// magnitudes switch to exponent form (`1e+16`, `1.5e-05`). Callers that need
/// a specific format should pre-format and send the string themselves.
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "nan".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = amount.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let rendered = format!("{amount:e}");
        if let Some((mantissa, exponent)) = rendered.split_once('e') {
            let exponent: i32 = exponent.parse().unwrap_or_default();
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{mantissa}e{sign}{:02}", exponent.abs());
        }
        return rendered;
    }

    if amount.fract() == 0.0 {
        format!("{amount:.1}")
    } else {
        amount.to_string()
    }
}
