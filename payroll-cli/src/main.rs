mod config;
mod logging;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use payroll_core::calculations::{
    PeriodTotals, SalaryCalculator, compare_periods, latest_two_periods, run_payroll,
};
use payroll_core::{EmployeeWageInput, PayPeriod, PayrollConfig, PayrollRepository, RepositoryError};
use payroll_db_sqlite::SqliteRepository;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::CliConfig;

/// Payroll calculation and reporting.
#[derive(Parser, Debug)]
#[command(name = "payroll")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database URL; overrides the config file
    #[arg(long, global = true)]
    database: Option<String>,

    /// Path to a payroll.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute one salary breakdown from a daily rate and attendance
    Calculate {
        /// Daily wage rate
        #[arg(long)]
        daily_rate: Decimal,

        /// Attendance days for the period (fractional values allowed)
        #[arg(long)]
        attendance: Decimal,

        /// Use built-in default rates instead of stored settings
        #[arg(long, default_value_t = false)]
        defaults: bool,
    },

    /// Run payroll over a stored period's attendance and print the report
    Report {
        /// Period to report on, e.g. "March 2025"
        #[arg(short, long)]
        period: PayPeriod,
    },

    /// Month-over-month comparison of two periods
    Compare {
        /// Current period; defaults to the most recent stored period
        #[arg(long)]
        current: Option<PayPeriod>,

        /// Previous period; defaults to the second most recent stored period
        #[arg(long)]
        previous: Option<PayPeriod>,
    },

    /// Show or update the stored payroll settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// List stored periods in calendar order
    Periods,

    /// List the employee roster
    Employees,
}

#[derive(Subcommand, Debug)]
enum SettingsAction {
    /// Print the stored settings (or the defaults if none are stored)
    Show,

    /// Update one settings field and persist the result
    Set {
        /// Field name, e.g. pf_employee_percent
        field: String,

        /// New value, a plain amount or percentage (12 means 12%)
        value: Decimal,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Calculate {
            daily_rate,
            attendance,
            defaults,
        } => {
            let config = if *defaults {
                PayrollConfig::default()
            } else {
                load_settings(&open_repository(&cli).await?).await?
            };
            calculate(*daily_rate, *attendance, config)
        }
        Command::Report { period } => {
            let repo = open_repository(&cli).await?;
            report(&repo, *period).await
        }
        Command::Compare { current, previous } => {
            let repo = open_repository(&cli).await?;
            compare(&repo, *current, *previous).await
        }
        Command::Settings { action } => {
            let repo = open_repository(&cli).await?;
            match action {
                SettingsAction::Show => {
                    let config = load_settings(&repo).await?;
                    print!("{}", settings::render_settings(&config));
                    Ok(())
                }
                SettingsAction::Set { field, value } => {
                    let mut config = load_settings(&repo).await?;
                    settings::apply_setting(&mut config, field, *value)?;
                    repo.save_settings(&config).await?;
                    println!("{field} = {value}");
                    Ok(())
                }
            }
        }
        Command::Periods => {
            let repo = open_repository(&cli).await?;
            for period in repo.list_periods().await? {
                println!("{period}");
            }
            Ok(())
        }
        Command::Employees => {
            let repo = open_repository(&cli).await?;
            for employee in repo.list_employees().await? {
                println!("{:<12} {}", employee.employee_id, employee.name);
            }
            Ok(())
        }
    }
}

async fn open_repository(cli: &Cli) -> Result<SqliteRepository> {
    let file_config = CliConfig::load(cli.config.as_deref())?;
    let database_url = file_config.database_url(cli.database.as_deref());

    let repo = SqliteRepository::new(&database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {database_url}"))?;
    repo.run_migrations()
        .await
        .context("Failed to run migrations")?;

    Ok(repo)
}

/// Stored settings, falling back to the built-in defaults when the settings
/// table has never been written.
async fn load_settings(repo: &SqliteRepository) -> Result<PayrollConfig> {
    match repo.get_settings().await {
        Ok(config) => Ok(config),
        Err(RepositoryError::NotFound) => {
            info!("no stored settings; using built-in defaults");
            Ok(PayrollConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn calculate(daily_rate: Decimal, attendance: Decimal, config: PayrollConfig) -> Result<()> {
    let calculator = SalaryCalculator::new(config);
    let breakdown = calculator.calculate(&EmployeeWageInput {
        daily_rate,
        attendance_days: attendance,
    })?;

    print!("{}", render::render_breakdown(&breakdown));
    Ok(())
}

async fn report(repo: &SqliteRepository, period: PayPeriod) -> Result<()> {
    let entries = repo.get_period_attendance(&period).await?;
    if entries.is_empty() {
        bail!("no attendance stored for {period}; load a sheet first");
    }

    let config = load_settings(repo).await?;
    let run = run_payroll(&entries, &config);

    println!("Salary report for {period}");
    print!("{}", render::render_report(&run));
    Ok(())
}

async fn compare(
    repo: &SqliteRepository,
    current: Option<PayPeriod>,
    previous: Option<PayPeriod>,
) -> Result<()> {
    let (current, previous) = match (current, previous) {
        (Some(c), Some(p)) => (c, p),
        (None, None) => {
            let periods = repo.list_periods().await?;
            latest_two_periods(&periods)
                .context("need at least two stored periods to compare; load more sheets")?
        }
        _ => bail!("--current and --previous must be given together"),
    };

    let config = load_settings(repo).await?;
    let current_totals = period_totals(repo, &current, &config).await?;
    let previous_totals = period_totals(repo, &previous, &config).await?;

    let comparison = compare_periods(&current_totals, &previous_totals);
    print!(
        "{}",
        render::render_comparison(&current.to_string(), &previous.to_string(), &comparison)
    );
    Ok(())
}

async fn period_totals(
    repo: &SqliteRepository,
    period: &PayPeriod,
    config: &PayrollConfig,
) -> Result<PeriodTotals> {
    let entries = repo.get_period_attendance(period).await?;
    let run = run_payroll(&entries, config);

    for error in &run.errors {
        tracing::warn!(
            employee_id = %error.employee_id,
            error = %error.error,
            period = %period,
            "employee excluded from period totals"
        );
    }

    Ok(PeriodTotals::summarize(&run.breakdowns()))
}
