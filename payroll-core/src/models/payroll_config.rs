use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`PayrollConfig`] fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayrollConfigError {
    /// A configured amount or percentage is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },
}

/// Company-wide statutory rates and amounts that parameterize every salary
/// calculation.
///
/// All `*_percent` fields are plain percentages: `12` means 12%, not `0.12`.
/// The calculator divides by 100 exactly once; callers must never pre-scale.
///
/// Mutable only through an explicit settings-update operation (the settings
/// store boundary); read-only during calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Variable Dearness Allowance, a flat currency amount added per period.
    /// Despite the name this is not a rate.
    pub vda_flat_amount: Decimal,

    /// Bonus percentage, applied to `daily_rate + vda`.
    pub bonus_percent: Decimal,

    /// Employee-side ESI percentage, applied to gross earnings.
    pub esi_employee_percent: Decimal,

    /// Employer-side ESI percentage, applied to gross earnings.
    pub esi_employer_percent: Decimal,

    /// Employee-side PF percentage, applied to monthly salary (not gross).
    pub pf_employee_percent: Decimal,

    /// Employer-side PF percentage, applied to monthly salary (not gross).
    pub pf_employer_percent: Decimal,

    /// Flat professional tax deduction, independent of earnings.
    pub professional_tax: Decimal,

    /// Flat Labour Welfare Fund employee contribution. Reported on the
    /// breakdown but not folded into the deduction total.
    pub lwf_employee_contribution: Decimal,

    /// Flat Labour Welfare Fund employer contribution. Reported on the
    /// breakdown but not folded into CTC.
    pub lwf_employer_contribution: Decimal,
}

impl PayrollConfig {
    /// Validates the configuration values.
    ///
    /// Payroll is a financial domain: a negative rate or amount is always a
    /// setup error, never something to clamp to zero.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollConfigError::Negative`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), PayrollConfigError> {
        let fields = [
            ("vda_flat_amount", self.vda_flat_amount),
            ("bonus_percent", self.bonus_percent),
            ("esi_employee_percent", self.esi_employee_percent),
            ("esi_employer_percent", self.esi_employer_percent),
            ("pf_employee_percent", self.pf_employee_percent),
            ("pf_employer_percent", self.pf_employer_percent),
            ("professional_tax", self.professional_tax),
            (
                "lwf_employee_contribution",
                self.lwf_employee_contribution,
            ),
            (
                "lwf_employer_contribution",
                self.lwf_employer_contribution,
            ),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(PayrollConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

impl Default for PayrollConfig {
    /// The rates observed in production before settings became configurable.
    fn default() -> Self {
        Self {
            vda_flat_amount: Decimal::new(13532, 2),
            bonus_percent: Decimal::new(833, 2),
            esi_employee_percent: Decimal::new(75, 2),
            esi_employer_percent: Decimal::new(325, 2),
            pf_employee_percent: Decimal::from(12),
            pf_employer_percent: Decimal::from(13),
            professional_tax: Decimal::from(200),
            lwf_employee_contribution: Decimal::ZERO,
            lwf_employer_contribution: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_carries_observed_production_rates() {
        let config = PayrollConfig::default();

        assert_eq!(config.vda_flat_amount, dec!(135.32));
        assert_eq!(config.bonus_percent, dec!(8.33));
        assert_eq!(config.esi_employee_percent, dec!(0.75));
        assert_eq!(config.esi_employer_percent, dec!(3.25));
        assert_eq!(config.pf_employee_percent, dec!(12));
        assert_eq!(config.pf_employer_percent, dec!(13));
        assert_eq!(config.professional_tax, dec!(200));
        assert_eq!(config.lwf_employee_contribution, dec!(0));
        assert_eq!(config.lwf_employer_contribution, dec!(0));
    }

    #[test]
    fn validate_accepts_default() {
        assert_eq!(PayrollConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_all_zero() {
        let config = PayrollConfig {
            vda_flat_amount: dec!(0),
            bonus_percent: dec!(0),
            esi_employee_percent: dec!(0),
            esi_employer_percent: dec!(0),
            pf_employee_percent: dec!(0),
            pf_employer_percent: dec!(0),
            professional_tax: dec!(0),
            lwf_employee_contribution: dec!(0),
            lwf_employer_contribution: dec!(0),
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_percentage() {
        let config = PayrollConfig {
            pf_employee_percent: dec!(-12),
            ..PayrollConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(PayrollConfigError::Negative {
                field: "pf_employee_percent",
                value: dec!(-12),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_flat_amount() {
        let config = PayrollConfig {
            professional_tax: dec!(-200),
            ..PayrollConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(PayrollConfigError::Negative {
                field: "professional_tax",
                value: dec!(-200),
            })
        );
    }
}
