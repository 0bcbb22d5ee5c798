//! `warehouse-sections` CLI entry-point.
//!
//! Available sub-commands:
//! - `migrate` — create the `sections` schema.
//! - `list`    — print every section.
//! - `get`     — print one section by id.
//! - `exists`  — check whether a section number is taken.
//! - `create`  — insert a section and print its new id.
//! - `update`  — overwrite a section by id.
//! - `delete`  — remove a section by id.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::{Section, SectionRepository, SqliteSectionRepository};

#[derive(Parser, Debug)]
#[command(
    name = "warehouse-sections",
    about = "Manage warehouse storage sections",
    version
)]
struct Cli {
    /// SQLite connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://warehouse.db", global = true)]
    database_url: String,

    /// Pool connection ceiling.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5, global = true)]
    max_connections: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run pending database migrations.
    Migrate,
    /// List all sections.
    List,
    /// Show a single section.
    Get { id: i64 },
    /// Check whether a section number is already stored.
    Exists { section_number: i64 },
    /// Insert a new section.
    Create(SectionArgs),
    /// Overwrite every field of an existing section.
    Update {
        id: i64,
        #[command(flatten)]
        fields: SectionArgs,
    },
    /// Delete a section.
    Delete { id: i64 },
}

/// Every section field except the storage-assigned id.
#[derive(Args, Debug)]
struct SectionArgs {
    #[arg(long)]
    section_number: i64,
    #[arg(long, allow_negative_numbers = true)]
    current_temperature: f64,
    #[arg(long, allow_negative_numbers = true)]
    minimum_temperature: f64,
    #[arg(long)]
    current_capacity: i64,
    #[arg(long)]
    minimum_capacity: i64,
    #[arg(long)]
    maximum_capacity: i64,
    #[arg(long)]
    warehouse_id: i64,
    #[arg(long)]
    product_type_id: i64,
}

impl SectionArgs {
    fn into_section(self, id: i64) -> Section {
        Section {
            id,
            section_number: self.section_number,
            current_temperature: self.current_temperature,
            minimum_temperature: self.minimum_temperature,
            current_capacity: self.current_capacity,
            minimum_capacity: self.minimum_capacity,
            maximum_capacity: self.maximum_capacity,
            warehouse_id: self.warehouse_id,
            product_type_id: self.product_type_id,
        }
    }
}

/// How a successfully dispatched command finished.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Done,
    /// `exists` could not tell whether the number is stored.
    LookupFailed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::LookupFailed => ExitCode::from(2u8),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pool = db::pool::create_pool(&cli.database_url, cli.max_connections)
        .await
        .with_context(|| format!("failed to connect to {}", cli.database_url))?;

    let result = run(cli.command, &pool).await;
    pool.close().await;
    result.map(ExitCode::from)
}

async fn run(command: Command, pool: &db::DbPool) -> anyhow::Result<Outcome> {
    let repo = SqliteSectionRepository::new(pool.clone());

    match command {
        Command::Migrate => {
            db::pool::run_migrations(pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::List => {
            let sections = repo.get_all().await?;
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        Command::Get { id } => {
            let section = repo
                .get(id)
                .await
                .with_context(|| format!("section {id}"))?;
            println!("{}", serde_json::to_string_pretty(&section)?);
        }
        Command::Exists { section_number } => match repo.lookup(section_number).await {
            Ok(found) => println!("{found}"),
            Err(e) => {
                eprintln!("lookup of section number {section_number} failed: {e}");
                return Ok(Outcome::LookupFailed);
            }
        },
        Command::Create(fields) => {
            let id = repo.save(&fields.into_section(0)).await?;
            info!(id, "Section created");
            println!("{id}");
        }
        Command::Update { id, fields } => {
            repo.update(&fields.into_section(id))
                .await
                .with_context(|| format!("section {id}"))?;
            info!(id, "Section updated");
        }
        Command::Delete { id } => {
            repo.delete(id)
                .await
                .with_context(|| format!("section {id}"))?;
            info!(id, "Section deleted");
        }
    }

    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [&str; 16] = [
        "--section-number", "5",
        "--current-temperature", "-2",
        "--minimum-temperature", "-10.5",
        "--current-capacity", "10",
        "--minimum-capacity", "0",
        "--maximum-capacity", "100",
        "--warehouse-id", "1",
        "--product-type-id", "1",
    ];

    #[test]
    fn create_parses_negative_temperatures() {
        let args = ["warehouse-sections", "create"].into_iter().chain(FIELDS);
        let cli = Cli::try_parse_from(args).unwrap();

        let Command::Create(fields) = cli.command else {
            panic!("expected create");
        };
        let section = fields.into_section(0);
        assert_eq!(section.section_number, 5);
        assert_eq!(section.current_temperature, -2.0);
        assert_eq!(section.minimum_temperature, -10.5);
        assert_eq!(section.maximum_capacity, 100);
    }

    #[test]
    fn update_carries_the_id() {
        let args = ["warehouse-sections", "update", "3"].into_iter().chain(FIELDS);
        let cli = Cli::try_parse_from(args).unwrap();

        let Command::Update { id, fields } = cli.command else {
            panic!("expected update");
        };
        assert_eq!(fields.into_section(id).id, 3);
    }

    #[test]
    fn create_requires_every_field() {
        let err = Cli::try_parse_from(["warehouse-sections", "create", "--section-number", "1"]);
        assert!(err.is_err());
    }

    #[test]
    fn database_flags_are_global() {
        let cli = Cli::try_parse_from([
            "warehouse-sections",
            "get",
            "4",
            "--database-url",
            "sqlite::memory:",
            "--max-connections",
            "1",
        ])
        .unwrap();

        assert_eq!(cli.database_url, "sqlite::memory:");
        assert_eq!(cli.max_connections, 1);
        assert!(matches!(cli.command, Command::Get { id: 4 }));
    }

    #[tokio::test]
    async fn run_drives_the_store_end_to_end() {
        let pool = db::pool::create_pool("sqlite::memory:", 1).await.unwrap();
        run(Command::Migrate, &pool).await.unwrap();

        let args = ["warehouse-sections", "create"].into_iter().chain(FIELDS);
        let create = Cli::try_parse_from(args).unwrap().command;
        run(create, &pool).await.unwrap();

        run(Command::Get { id: 1 }, &pool).await.unwrap();
        run(Command::Delete { id: 1 }, &pool).await.unwrap();
        assert!(run(Command::Get { id: 1 }, &pool).await.is_err());
        assert_eq!(
            run(Command::Exists { section_number: 5 }, &pool).await.unwrap(),
            Outcome::Done
        );
    }

    #[tokio::test]
    async fn exists_reports_failed_lookup_as_outcome() {
        // No migration: the `sections` table is missing.
        let pool = db::pool::create_pool("sqlite::memory:", 1).await.unwrap();

        let outcome = run(Command::Exists { section_number: 5 }, &pool).await.unwrap();
        assert_eq!(outcome, Outcome::LookupFailed);

        // The pool is still open, so the caller can close it.
        assert!(!pool.is_closed());
        pool.close().await;
    }
}
