use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use payroll_core::PayPeriod;
use payroll_data::AttendanceSheetLoader;
use payroll_db_sqlite::SqliteRepository;

/// Load an attendance sheet (CSV) into the payroll database.
///
/// The CSV file should have the following columns:
/// - employee_id: The employee's identifier
/// - name: The employee's display name (optional; falls back to the id)
/// - daily_rate: The daily wage rate
/// - attendance_days: Attendance for the period (fractional values allowed)
///
/// Rows with a missing id or missing/negative financial fields are rejected
/// and reported individually; the rest of the sheet still loads.
#[derive(Parser, Debug)]
#[command(name = "payroll-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing attendance rows
    #[arg(short, long)]
    file: PathBuf,

    /// Payroll period the sheet covers, e.g. "March 2025"
    #[arg(short, long)]
    period: PayPeriod,

    /// SQLite database URL (e.g. sqlite:payroll.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:payroll.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let repo = SqliteRepository::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        repo.run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if let Some(seeds_dir) = &args.seeds {
        println!("Running seeds from: {}", seeds_dir.display());
        repo.run_seeds(seeds_dir)
            .await
            .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        println!("Seeds complete.");
    }

    println!(
        "Loading attendance for {} from: {}",
        args.period,
        args.file.display()
    );

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let rows = AttendanceSheetLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} rows from CSV", rows.len());

    let sheet = AttendanceSheetLoader::validate(&rows, args.period);

    for rejected in &sheet.rejected {
        eprintln!("Rejected {rejected}");
    }

    let inserted = AttendanceSheetLoader::load(&repo, &args.period, &sheet)
        .await
        .context("Failed to load attendance into database")?;

    println!(
        "Successfully loaded {} attendance entries for {} ({} rows rejected).",
        inserted,
        args.period,
        sheet.rejected.len()
    );

    Ok(())
}
