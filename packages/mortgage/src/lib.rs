#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Fixed-rate mortgage math.
//!
//! One entry point: [`amortize`], which validates a [`LoanRequest`] and
//! returns the standard annuity breakdown. Rendering (ruble grouping, the
//! million-ruble abbreviation) belongs to the caller; everything here is
//! raw numbers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs to the mortgage calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Full property price, in rubles.
    pub property_price: f64,
    /// Up-front payment, in rubles. Must stay within `0..=property_price`.
    pub down_payment: f64,
    /// Annual interest rate as a percentage (12.0 means 12% per year).
    pub annual_rate_percent: f64,
    /// Loan term in whole years.
    pub term_years: u32,
}

impl Default for LoanRequest {
    /// The calculator's initial position: a ten-million-ruble property with
    /// a 20% down payment over twenty years at 12%.
    fn default() -> Self {
        Self {
            property_price: 10_000_000.0,
            down_payment: 2_000_000.0,
            annual_rate_percent: 12.0,
            term_years: 20,
        }
    }
}

impl LoanRequest {
    /// Checks every input against the validation rules without computing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: the price must be a positive finite
    /// amount, the down payment must be finite and within
    /// `0..=property_price`, the rate must be finite and non-negative, and
    /// the term must be at least one year.
    pub fn validate(&self) -> Result<(), MortgageError> {
        if !self.property_price.is_finite() || self.property_price <= 0.0 {
            return Err(MortgageError::InvalidPrice {
                price: self.property_price,
            });
        }
        if !self.down_payment.is_finite()
            || self.down_payment < 0.0
            || self.down_payment > self.property_price
        {
            return Err(MortgageError::InvalidDownPayment {
                down_payment: self.down_payment,
                property_price: self.property_price,
            });
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(MortgageError::InvalidRate {
                rate: self.annual_rate_percent,
            });
        }
        if self.term_years == 0 {
            return Err(MortgageError::InvalidTerm {
                years: self.term_years,
            });
        }
        Ok(())
    }

    /// Share of the property price covered by the down payment, in percent.
    #[must_use]
    pub fn down_payment_percent(&self) -> f64 {
        if self.property_price > 0.0 {
            self.down_payment / self.property_price * 100.0
        } else {
            0.0
        }
    }
}

/// The computed cost of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    /// Amount borrowed: property price minus down payment.
    pub loan_amount: f64,
    /// Fixed monthly payment.
    pub monthly_payment: f64,
    /// Everything paid over the full term.
    pub total_payment: f64,
    /// Total paid on top of the loan amount.
    pub total_interest: f64,
}

/// Errors that can occur while validating a [`LoanRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MortgageError {
    /// The property price was zero, negative, or not finite.
    #[error("property price must be a positive amount, got {price}")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// The down payment was negative, above the property price, or not
    /// finite.
    #[error("down payment must be between 0 and the property price {property_price}, got {down_payment}")]
    InvalidDownPayment {
        /// The rejected down payment.
        down_payment: f64,
        /// The property price it was checked against.
        property_price: f64,
    },

    /// The interest rate was negative or not finite.
    #[error("interest rate must be a non-negative percentage, got {rate}")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },

    /// The loan term was zero years.
    #[error("loan term must be at least one year, got {years}")]
    InvalidTerm {
        /// The rejected term.
        years: u32,
    },
}

/// Computes the fixed-rate payment breakdown for a loan request.
///
/// A zero rate divides the loan evenly across the term; any positive rate
/// uses the standard annuity formula.
///
/// # Errors
///
/// Returns a [`MortgageError`] when the request fails validation; inputs
/// are rejected rather than clamped.
pub fn amortize(request: &LoanRequest) -> Result<PaymentBreakdown, MortgageError> {
    request.validate()?;

    let loan_amount = request.property_price - request.down_payment;
    let payments = f64::from(request.term_years) * 12.0;
    let monthly_rate = request.annual_rate_percent / 100.0 / 12.0;

    let monthly_payment = if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powf(payments);
        loan_amount * (monthly_rate * growth) / (growth - 1.0)
    } else {
        loan_amount / payments
    };

    let total_payment = monthly_payment * payments;
    Ok(PaymentBreakdown {
        loan_amount,
        monthly_payment,
        total_payment,
        total_interest: total_payment - loan_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_divides_evenly() {
        let request = LoanRequest {
            property_price: 10_000_000.0,
            down_payment: 2_000_000.0,
            annual_rate_percent: 0.0,
            term_years: 10,
        };
        let breakdown = amortize(&request).unwrap();
        assert!((breakdown.loan_amount - 8_000_000.0).abs() < f64::EPSILON);
        assert!((breakdown.monthly_payment - 8_000_000.0 / 120.0).abs() < 1e-6);
        assert!((breakdown.total_payment - 8_000_000.0).abs() < 1e-6);
        assert!(breakdown.total_interest.abs() < 1e-6);
    }

    #[test]
    fn annuity_payment_retires_the_loan_exactly() {
        let request = LoanRequest::default();
        let breakdown = amortize(&request).unwrap();
        assert!((breakdown.loan_amount - 8_000_000.0).abs() < f64::EPSILON);

        // Replaying the schedule month by month must bring the balance to
        // zero, which pins the closed-form payment to the right value.
        let monthly_rate = request.annual_rate_percent / 100.0 / 12.0;
        let mut balance = breakdown.loan_amount;
        for _ in 0..request.term_years * 12 {
            balance = balance * (1.0 + monthly_rate) - breakdown.monthly_payment;
        }
        assert!(
            balance.abs() < 0.01,
            "residual balance {balance} after the full term"
        );

        let payments = f64::from(request.term_years) * 12.0;
        assert!((breakdown.total_payment - breakdown.monthly_payment * payments).abs() < 1e-6);
        assert!(
            (breakdown.total_interest - (breakdown.total_payment - breakdown.loan_amount)).abs()
                < 1e-6
        );
        // With interest in play the payment must beat the straight-line one.
        assert!(breakdown.monthly_payment > breakdown.loan_amount / payments);
    }

    #[test]
    fn full_down_payment_costs_nothing() {
        let request = LoanRequest {
            property_price: 10_000_000.0,
            down_payment: 10_000_000.0,
            annual_rate_percent: 12.0,
            term_years: 20,
        };
        let breakdown = amortize(&request).unwrap();
        assert!(breakdown.loan_amount.abs() < f64::EPSILON);
        assert!(breakdown.monthly_payment.abs() < f64::EPSILON);
        assert!(breakdown.total_payment.abs() < f64::EPSILON);
        assert!(breakdown.total_interest.abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_inputs_are_rejected_not_clamped() {
        let base = LoanRequest::default();

        let request = LoanRequest {
            property_price: 0.0,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidPrice { .. })
        ));

        let request = LoanRequest {
            property_price: f64::NAN,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidPrice { .. })
        ));

        let request = LoanRequest {
            down_payment: -1.0,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidDownPayment { .. })
        ));

        let request = LoanRequest {
            down_payment: base.property_price + 1.0,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidDownPayment { .. })
        ));

        let request = LoanRequest {
            annual_rate_percent: -0.1,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidRate { .. })
        ));

        let request = LoanRequest {
            term_years: 0,
            ..base
        };
        assert!(matches!(
            amortize(&request),
            Err(MortgageError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn down_payment_percent_reads_off_the_request() {
        let request = LoanRequest::default();
        assert!((request.down_payment_percent() - 20.0).abs() < 1e-9);

        let degenerate = LoanRequest {
            property_price: 0.0,
            ..request
        };
        assert!((degenerate.down_payment_percent() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let breakdown = amortize(&LoanRequest::default()).unwrap();
        let value = serde_json::to_value(breakdown).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("loanAmount"));
        assert!(object.contains_key("monthlyPayment"));
        assert!(object.contains_key("totalPayment"));
        assert!(object.contains_key("totalInterest"));
    }
}
