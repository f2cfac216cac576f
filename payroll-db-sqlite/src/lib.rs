//! SQLite-backed implementation of the payroll repository.
//!
//! Decimal amounts and percentages are stored as TEXT and parsed back with
//! [`rust_decimal`], so statutory rates round-trip exactly. A required
//! financial column that comes back NULL or unparseable is a database error,
//! never a silent zero.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use payroll_core::{
    AttendanceEntry, EmployeeProfile, PayPeriod, PayrollConfig, PayrollRepository, RepositoryError,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, sqlite::SqlitePool};
use tracing::info;

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(&self, seeds_dir: &Path) -> Result<(), RepositoryError> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seeds directory '{}': {}",
                    seeds_dir.display(),
                    e
                ))
            })?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to read seed file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Database(format!(
                        "Failed to execute seed file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
            info!(seed = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(FromRow)]
struct SettingsRow {
    vda_flat_amount: String,
    bonus_percent: String,
    esi_employee_percent: String,
    esi_employer_percent: String,
    pf_employee_percent: String,
    pf_employer_percent: String,
    professional_tax: String,
    lwf_employee_contribution: String,
    lwf_employer_contribution: String,
}

impl TryFrom<SettingsRow> for PayrollConfig {
    type Error = RepositoryError;

    fn try_from(row: SettingsRow) -> Result<Self, Self::Error> {
        Ok(PayrollConfig {
            vda_flat_amount: parse_decimal(&row.vda_flat_amount)?,
            bonus_percent: parse_decimal(&row.bonus_percent)?,
            esi_employee_percent: parse_decimal(&row.esi_employee_percent)?,
            esi_employer_percent: parse_decimal(&row.esi_employer_percent)?,
            pf_employee_percent: parse_decimal(&row.pf_employee_percent)?,
            pf_employer_percent: parse_decimal(&row.pf_employer_percent)?,
            professional_tax: parse_decimal(&row.professional_tax)?,
            lwf_employee_contribution: parse_decimal(&row.lwf_employee_contribution)?,
            lwf_employer_contribution: parse_decimal(&row.lwf_employer_contribution)?,
        })
    }
}

#[derive(FromRow)]
struct AttendanceRow {
    employee_id: String,
    year: i32,
    month: i32,
    daily_rate: String,
    attendance_days: String,
}

impl TryFrom<AttendanceRow> for AttendanceEntry {
    type Error = RepositoryError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let period = PayPeriod::new(row.year, row.month as u32).ok_or_else(|| {
            RepositoryError::Database(format!("Invalid month {} in attendance row", row.month))
        })?;
        Ok(AttendanceEntry {
            employee_id: row.employee_id,
            period,
            daily_rate: parse_decimal(&row.daily_rate)?,
            attendance_days: parse_decimal(&row.attendance_days)?,
        })
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, RepositoryError> {
    s.parse::<Decimal>()
        .map_err(|e| RepositoryError::Database(format!("Failed to parse decimal '{}': {}", s, e)))
}

#[async_trait]
impl PayrollRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<PayrollConfig, RepositoryError> {
        let row: SettingsRow = sqlx::query_as(
            "SELECT vda_flat_amount, bonus_percent, esi_employee_percent,
                    esi_employer_percent, pf_employee_percent, pf_employer_percent,
                    professional_tax, lwf_employee_contribution, lwf_employer_contribution
             FROM payroll_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn save_settings(&self, config: &PayrollConfig) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO payroll_settings (
                id, vda_flat_amount, bonus_percent, esi_employee_percent,
                esi_employer_percent, pf_employee_percent, pf_employer_percent,
                professional_tax, lwf_employee_contribution, lwf_employer_contribution,
                updated_at
             ) VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT (id) DO UPDATE SET
                vda_flat_amount = excluded.vda_flat_amount,
                bonus_percent = excluded.bonus_percent,
                esi_employee_percent = excluded.esi_employee_percent,
                esi_employer_percent = excluded.esi_employer_percent,
                pf_employee_percent = excluded.pf_employee_percent,
                pf_employer_percent = excluded.pf_employer_percent,
                professional_tax = excluded.professional_tax,
                lwf_employee_contribution = excluded.lwf_employee_contribution,
                lwf_employer_contribution = excluded.lwf_employer_contribution,
                updated_at = excluded.updated_at",
        )
        .bind(config.vda_flat_amount.to_string())
        .bind(config.bonus_percent.to_string())
        .bind(config.esi_employee_percent.to_string())
        .bind(config.esi_employer_percent.to_string())
        .bind(config.pf_employee_percent.to_string())
        .bind(config.pf_employer_percent.to_string())
        .bind(config.professional_tax.to_string())
        .bind(config.lwf_employee_contribution.to_string())
        .bind(config.lwf_employer_contribution.to_string())
        .bind(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn upsert_employee(&self, employee: &EmployeeProfile) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO employees (employee_id, name) VALUES (?, ?)
             ON CONFLICT (employee_id) DO UPDATE SET name = excluded.name",
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeProfile>, RepositoryError> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT employee_id, name FROM employees ORDER BY employee_id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(employee_id, name)| EmployeeProfile { employee_id, name })
            .collect())
    }

    async fn replace_period_attendance(
        &self,
        period: &PayPeriod,
        entries: &[AttendanceEntry],
    ) -> Result<usize, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        sqlx::query("DELETE FROM attendance WHERE year = ? AND month = ?")
            .bind(period.year)
            .bind(period.month as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        for entry in entries {
            sqlx::query(
                "INSERT INTO attendance (employee_id, year, month, daily_rate, attendance_days)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&entry.employee_id)
            .bind(period.year)
            .bind(period.month as i32)
            .bind(entry.daily_rate.to_string())
            .bind(entry.attendance_days.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        Ok(entries.len())
    }

    async fn get_period_attendance(
        &self,
        period: &PayPeriod,
    ) -> Result<Vec<AttendanceEntry>, RepositoryError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            "SELECT employee_id, year, month, daily_rate, attendance_days
             FROM attendance WHERE year = ? AND month = ?
             ORDER BY employee_id",
        )
        .bind(period.year)
        .bind(period.month as i32)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn list_periods(&self) -> Result<Vec<PayPeriod>, RepositoryError> {
        let rows: Vec<(i32, i32)> = sqlx::query_as(
            "SELECT DISTINCT year, month FROM attendance ORDER BY year, month",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(year, month)| {
                PayPeriod::new(year, month as u32).ok_or_else(|| {
                    RepositoryError::Database(format!("Invalid month {} in attendance row", month))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn repository() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        let repo = SqliteRepository::new_with_pool(pool);
        repo.run_migrations().await.expect("migrations");
        repo
    }

    fn period(year: i32, month: u32) -> PayPeriod {
        PayPeriod::new(year, month).unwrap()
    }

    fn entry(employee_id: &str, p: PayPeriod, rate: Decimal, days: Decimal) -> AttendanceEntry {
        AttendanceEntry {
            employee_id: employee_id.to_string(),
            period: p,
            daily_rate: rate,
            attendance_days: days,
        }
    }

    // =========================================================================
    // settings tests
    // =========================================================================

    #[tokio::test]
    async fn settings_missing_before_seed_is_not_found() {
        let repo = repository().await;

        let result = repo.get_settings().await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn seed_installs_default_settings() {
        let repo = repository().await;
        repo.run_seeds(Path::new("seeds")).await.expect("seeds");

        let settings = repo.get_settings().await.expect("settings");

        assert_eq!(settings, PayrollConfig::default());
    }

    #[tokio::test]
    async fn settings_round_trip_preserves_exact_decimals() {
        let repo = repository().await;
        let config = PayrollConfig {
            vda_flat_amount: dec!(135.32),
            esi_employee_percent: dec!(0.75),
            ..PayrollConfig::default()
        };

        repo.save_settings(&config).await.expect("save");
        let loaded = repo.get_settings().await.expect("load");

        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn save_settings_overwrites_the_single_row() {
        let repo = repository().await;
        repo.save_settings(&PayrollConfig::default()).await.unwrap();

        let updated = PayrollConfig {
            professional_tax: dec!(250),
            ..PayrollConfig::default()
        };
        repo.save_settings(&updated).await.unwrap();

        assert_eq!(repo.get_settings().await.unwrap(), updated);
    }

    // =========================================================================
    // employee tests
    // =========================================================================

    #[tokio::test]
    async fn upsert_employee_inserts_then_updates_name() {
        let repo = repository().await;
        let original = EmployeeProfile {
            employee_id: "EMP001".to_string(),
            name: "A. Kumar".to_string(),
        };
        let renamed = EmployeeProfile {
            employee_id: "EMP001".to_string(),
            name: "Anil Kumar".to_string(),
        };

        repo.upsert_employee(&original).await.unwrap();
        repo.upsert_employee(&renamed).await.unwrap();
        let employees = repo.list_employees().await.unwrap();

        assert_eq!(employees, vec![renamed]);
    }

    // =========================================================================
    // attendance tests
    // =========================================================================

    #[tokio::test]
    async fn attendance_round_trips_with_fractional_days() {
        let repo = repository().await;
        let p = period(2025, 3);
        repo.upsert_employee(&EmployeeProfile {
            employee_id: "EMP001".to_string(),
            name: "A. Kumar".to_string(),
        })
        .await
        .unwrap();
        let entries = vec![entry("EMP001", p, dec!(487.63), dec!(23.5))];

        let inserted = repo.replace_period_attendance(&p, &entries).await.unwrap();
        let loaded = repo.get_period_attendance(&p).await.unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(loaded, entries);
    }

    #[tokio::test]
    async fn replacing_a_period_is_idempotent() {
        let repo = repository().await;
        let p = period(2025, 3);
        for id in ["EMP001", "EMP002"] {
            repo.upsert_employee(&EmployeeProfile {
                employee_id: id.to_string(),
                name: id.to_string(),
            })
            .await
            .unwrap();
        }
        let entries = vec![
            entry("EMP001", p, dec!(500), dec!(26)),
            entry("EMP002", p, dec!(450), dec!(24)),
        ];

        repo.replace_period_attendance(&p, &entries).await.unwrap();
        repo.replace_period_attendance(&p, &entries).await.unwrap();

        assert_eq!(repo.get_period_attendance(&p).await.unwrap(), entries);
    }

    #[tokio::test]
    async fn replacing_one_period_leaves_others_untouched() {
        let repo = repository().await;
        let march = period(2025, 3);
        let april = period(2025, 4);
        repo.upsert_employee(&EmployeeProfile {
            employee_id: "EMP001".to_string(),
            name: "A. Kumar".to_string(),
        })
        .await
        .unwrap();
        let march_entries = vec![entry("EMP001", march, dec!(500), dec!(26))];
        let april_entries = vec![entry("EMP001", april, dec!(500), dec!(25))];

        repo.replace_period_attendance(&march, &march_entries)
            .await
            .unwrap();
        repo.replace_period_attendance(&april, &april_entries)
            .await
            .unwrap();
        repo.replace_period_attendance(&april, &[]).await.unwrap();

        assert_eq!(
            repo.get_period_attendance(&march).await.unwrap(),
            march_entries
        );
        assert_eq!(repo.get_period_attendance(&april).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn list_periods_is_in_calendar_order() {
        let repo = repository().await;
        repo.upsert_employee(&EmployeeProfile {
            employee_id: "EMP001".to_string(),
            name: "A. Kumar".to_string(),
        })
        .await
        .unwrap();
        for p in [period(2025, 1), period(2024, 12), period(2024, 11)] {
            repo.replace_period_attendance(&p, &[entry("EMP001", p, dec!(500), dec!(26))])
                .await
                .unwrap();
        }

        let periods = repo.list_periods().await.unwrap();

        assert_eq!(
            periods,
            vec![period(2024, 11), period(2024, 12), period(2025, 1)]
        );
    }
}
