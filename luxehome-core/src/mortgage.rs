//! Mortgage payment estimate shown on listing pages

use serde::{Deserialize, Serialize};

pub const DEFAULT_DOWN_PAYMENT_RATIO: f64 = 0.2;
pub const DEFAULT_INTEREST_RATE: f64 = 6.5;
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Loan parameters; omitted fields use the listing-page defaults
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MortgageParams {
    pub price: f64,
    pub down_payment: Option<f64>,
    /// Annual rate in percent
    pub interest_rate: Option<f64>,
    pub term_years: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MortgageEstimate {
    pub principal: f64,
    pub monthly_payment: f64,
    pub down_payment_percent: f64,
    pub total_interest: f64,
}

impl MortgageParams {
    /// Amortized monthly payment. A zero rate divides the principal evenly.
    pub fn estimate(&self) -> MortgageEstimate {
        let down = self
            .down_payment
            .unwrap_or(self.price * DEFAULT_DOWN_PAYMENT_RATIO)
            .clamp(0.0, self.price.max(0.0));
        let rate = self.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE).max(0.0);
        let payments = self.term_years.unwrap_or(DEFAULT_TERM_YEARS).max(1) as f64 * 12.0;

        let principal = (self.price - down).max(0.0);
        let monthly_rate = rate / 100.0 / 12.0;
        let monthly_payment = if monthly_rate == 0.0 {
            principal / payments
        } else {
            let growth = (1.0 + monthly_rate).powf(payments);
            principal * monthly_rate * growth / (growth - 1.0)
        };

        MortgageEstimate {
            principal,
            monthly_payment,
            down_payment_percent: if self.price > 0.0 {
                down / self.price * 100.0
            } else {
                0.0
            },
            total_interest: monthly_payment * payments - principal,
        }
    }
}
