use anyhow::{Result, bail};
use payroll_core::PayrollConfig;
use rust_decimal::Decimal;

/// The editable settings fields, as accepted by `payroll settings set`.
pub const FIELD_NAMES: [&str; 9] = [
    "vda_flat_amount",
    "bonus_percent",
    "esi_employee_percent",
    "esi_employer_percent",
    "pf_employee_percent",
    "pf_employer_percent",
    "professional_tax",
    "lwf_employee_contribution",
    "lwf_employer_contribution",
];

/// Applies one field update to a configuration, then re-validates the whole
/// thing so a bad value never reaches the store.
pub fn apply_setting(config: &mut PayrollConfig, field: &str, value: Decimal) -> Result<()> {
    match field {
        "vda_flat_amount" => config.vda_flat_amount = value,
        "bonus_percent" => config.bonus_percent = value,
        "esi_employee_percent" => config.esi_employee_percent = value,
        "esi_employer_percent" => config.esi_employer_percent = value,
        "pf_employee_percent" => config.pf_employee_percent = value,
        "pf_employer_percent" => config.pf_employer_percent = value,
        "professional_tax" => config.professional_tax = value,
        "lwf_employee_contribution" => config.lwf_employee_contribution = value,
        "lwf_employer_contribution" => config.lwf_employer_contribution = value,
        other => bail!(
            "unknown settings field '{}'; expected one of: {}",
            other,
            FIELD_NAMES.join(", ")
        ),
    }
    config.validate()?;
    Ok(())
}

/// `settings show` output, one `name = value` line per field.
pub fn render_settings(config: &PayrollConfig) -> String {
    let mut out = String::new();
    let rows = [
        ("vda_flat_amount", config.vda_flat_amount),
        ("bonus_percent", config.bonus_percent),
        ("esi_employee_percent", config.esi_employee_percent),
        ("esi_employer_percent", config.esi_employer_percent),
        ("pf_employee_percent", config.pf_employee_percent),
        ("pf_employer_percent", config.pf_employer_percent),
        ("professional_tax", config.professional_tax),
        ("lwf_employee_contribution", config.lwf_employee_contribution),
        ("lwf_employer_contribution", config.lwf_employer_contribution),
    ];
    for (name, value) in rows {
        out.push_str(&format!("{name:<26} = {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn updates_a_named_field() {
        let mut config = PayrollConfig::default();

        apply_setting(&mut config, "professional_tax", dec!(250)).unwrap();

        assert_eq!(config.professional_tax, dec!(250));
        // Everything else untouched.
        assert_eq!(config.bonus_percent, dec!(8.33));
    }

    #[test]
    fn rejects_unknown_field_names() {
        let mut config = PayrollConfig::default();

        let result = apply_setting(&mut config, "esi_percent", dec!(1));

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("unknown settings field 'esi_percent'")
        );
    }

    #[test]
    fn rejects_values_that_fail_validation() {
        let mut config = PayrollConfig::default();

        let result = apply_setting(&mut config, "bonus_percent", dec!(-8.33));

        assert!(result.is_err());
    }

    #[test]
    fn renders_one_line_per_field() {
        let rendered = render_settings(&PayrollConfig::default());

        assert_eq!(rendered.lines().count(), FIELD_NAMES.len());
        assert!(rendered.contains("vda_flat_amount            = 135.32"));
        assert!(rendered.contains("pf_employee_percent        = 12"));
    }
}
