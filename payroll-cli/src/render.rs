use payroll_core::SalaryBreakdown;
use payroll_core::calculations::{PayrollRunReport, PeriodComparison, PeriodTotals};
use rust_decimal::Decimal;

/// One labelled line of a payslip. The `.2` precision pads whole-number
/// decimals out to two places so columns of currency line up.
fn line(out: &mut String, label: &str, value: Decimal) {
    out.push_str(&format!("  {label:<20} {value:>14.2}\n"));
}

/// A single employee's payslip, rounded to two decimal places for display.
pub fn render_breakdown(breakdown: &SalaryBreakdown) -> String {
    let b = breakdown.rounded();
    let mut out = String::new();

    out.push_str("Earnings\n");
    line(&mut out, "Monthly salary", b.monthly_salary);
    line(&mut out, "VDA", b.vda);
    line(&mut out, "Paid leave", b.paid_leave);
    line(&mut out, "Bonus", b.bonus);
    line(&mut out, "Gross earnings", b.gross_earnings);

    out.push_str("Deductions\n");
    line(&mut out, "PF (employee)", b.pf_employee);
    line(&mut out, "ESI (employee)", b.esi_employee);
    line(&mut out, "Professional tax", b.professional_tax);
    line(&mut out, "LWF (employee)", b.lwf_employee);
    line(&mut out, "Total deductions", b.total_deductions);

    out.push_str("Employer contributions\n");
    line(&mut out, "PF (employer)", b.pf_employer);
    line(&mut out, "ESI (employer)", b.esi_employer);
    line(&mut out, "LWF (employer)", b.lwf_employer);

    out.push_str("Summary\n");
    line(&mut out, "Net salary", b.net_salary);
    line(&mut out, "CTC", b.ctc);

    out
}

/// The salary report table for one period, one row per computed payslip,
/// followed by period totals and a distinct section for failed rows.
pub fn render_report(report: &PayrollRunReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>12}\n",
        "Employee", "Monthly", "Gross", "Deductions", "Net", "CTC"
    ));

    for payslip in &report.payslips {
        let b = payslip.breakdown.rounded();
        out.push_str(&format!(
            "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}\n",
            payslip.employee_id,
            b.monthly_salary,
            b.gross_earnings,
            b.total_deductions,
            b.net_salary,
            b.ctc
        ));
    }

    let totals = PeriodTotals::summarize(&report.breakdowns());
    out.push_str(&format!(
        "\n{} employees, total net salary {:.2}, average {:.2}\n",
        totals.employee_count,
        round2(totals.total_net_salary),
        round2(totals.average_net_salary),
    ));

    if !report.errors.is_empty() {
        out.push_str("\nFailed rows (excluded from totals):\n");
        for error in &report.errors {
            out.push_str(&format!("  {}: {}\n", error.employee_id, error.error));
        }
    }

    out
}

/// Month-over-month changes, sign always shown.
pub fn render_comparison(
    current: &str,
    previous: &str,
    comparison: &PeriodComparison,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{current} vs {previous}\n"));
    out.push_str(&format!(
        "  Employees      {}\n",
        signed_percent(comparison.employee_count_change_percent)
    ));
    out.push_str(&format!(
        "  Total net      {}\n",
        signed_percent(comparison.total_net_salary_change_percent)
    ));
    out.push_str(&format!(
        "  Average net    {}\n",
        signed_percent(comparison.average_net_salary_change_percent)
    ));
    out
}

fn signed_percent(value: Decimal) -> String {
    if value.is_zero() {
        "no change".to_string()
    } else if value > Decimal::ZERO {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use payroll_core::calculations::run_payroll;
    use payroll_core::{AttendanceEntry, PayPeriod, PayrollConfig};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn report() -> PayrollRunReport {
        let period = PayPeriod::new(2025, 3).unwrap();
        let entries = vec![
            AttendanceEntry {
                employee_id: "EMP001".to_string(),
                period,
                daily_rate: dec!(500),
                attendance_days: dec!(26),
            },
            AttendanceEntry {
                employee_id: "EMP002".to_string(),
                period,
                daily_rate: dec!(-450),
                attendance_days: dec!(24),
            },
        ];
        run_payroll(&entries, &PayrollConfig::default())
    }

    #[test]
    fn payslip_shows_golden_figures_at_two_places() {
        let report = report();
        let rendered = render_breakdown(&report.payslips[0].breakdown);

        assert!(rendered.contains("Monthly salary"));
        assert!(rendered.contains("13000.00"));
        assert!(rendered.contains("11360.86"));
        assert!(rendered.contains("15339.66"));
        // Whole-number components are padded to two places.
        assert!(rendered.contains("1560.00"));
        assert!(rendered.contains("200.00"));
    }

    #[test]
    fn report_names_the_failed_employee_and_reason() {
        let rendered = render_report(&report());

        assert!(rendered.contains("EMP001"));
        assert!(rendered.contains("Failed rows (excluded from totals):"));
        assert!(rendered.contains("EMP002: daily rate must not be negative, got -450"));
    }

    #[test]
    fn report_totals_cover_only_computed_rows() {
        let rendered = render_report(&report());

        assert!(rendered.contains("1 employees, total net salary 11360.86, average 11360.86"));
    }

    #[test]
    fn comparison_formats_signs_and_suppressed_changes() {
        let comparison = PeriodComparison {
            employee_count_change_percent: dec!(4.0),
            total_net_salary_change_percent: dec!(-2.5),
            average_net_salary_change_percent: dec!(0),
        };

        let rendered = render_comparison("April 2025", "March 2025", &comparison);

        assert_eq!(
            rendered,
            "April 2025 vs March 2025\n  Employees      +4.0%\n  Total net      -2.5%\n  Average net    no change\n"
        );
    }
}
