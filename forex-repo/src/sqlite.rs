//! SQLite store adapter.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};

use forex_types::{ForexEntry, ForexStore, IsoCode, StoreError, UpsertOutcome};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite-backed `ForexStore`.
///
/// Row-level atomicity comes from SQLite's own transactional write path;
/// every `upsert` runs inside one transaction, so concurrent writers of the
/// same ISO code serialize on the database write lock and one write wins
/// entirely.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if absent) the backing database and ensures the schema.
    /// Safe to call on every startup.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent)
                            .await
                            .map_err(|e| StoreError::Open(e.to_string()))?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Open(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;

        let ddl = include_str!("../migrations/0001_create_forex.sql");
        sqlx::query(ddl)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Open(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Releases the underlying connections. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Database rows
// ─────────────────────────────────────────────────────────────────────────────

/// Forex row from database.
#[derive(FromRow)]
struct DbForexRow {
    iso_code: String,
    territory: String,
    currency: String,
    symbol: String,
    date: String,
    rate: f64,
}

impl DbForexRow {
    fn into_domain(self) -> Result<ForexEntry, StoreError> {
        let iso_code =
            IsoCode::new(&self.iso_code).map_err(|e| StoreError::Database(e.to_string()))?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(ForexEntry {
            iso_code,
            territory: self.territory,
            currency_name: self.currency,
            symbol: self.symbol,
            date,
            rate: self.rate,
        })
    }
}

/// Key-only row for existence probes.
#[derive(FromRow)]
struct DbIsoCode {
    #[allow(dead_code)]
    iso_code: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Store implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ForexStore for SqliteStore {
    async fn upsert(&self, entry: &ForexEntry) -> Result<UpsertOutcome, StoreError> {
        let iso_code = entry.iso_code.as_str();
        let date = entry.date.format(DATE_FORMAT).to_string();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let existing: Option<DbIsoCode> =
            sqlx::query_as(r#"SELECT iso_code FROM forex WHERE iso_code = ?"#)
                .bind(iso_code)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        let outcome = if existing.is_some() {
            // Descriptive columns stay as written at creation time.
            sqlx::query(r#"UPDATE forex SET rate = ?, date = ? WHERE iso_code = ?"#)
                .bind(entry.rate)
                .bind(&date)
                .bind(iso_code)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;
            UpsertOutcome::Updated
        } else {
            sqlx::query(
                r#"INSERT INTO forex (iso_code, territory, currency, symbol, date, rate)
                   VALUES (?, ?, ?, ?, ?, ?)"#,
            )
            .bind(iso_code)
            .bind(&entry.territory)
            .bind(&entry.currency_name)
            .bind(&entry.symbol)
            .bind(&date)
            .bind(entry.rate)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
            UpsertOutcome::Inserted
        };

        tx.commit()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(outcome)
    }

    async fn read_all(&self) -> Result<Vec<ForexEntry>, StoreError> {
        let rows: Vec<DbForexRow> = sqlx::query_as(
            r#"SELECT iso_code, territory, currency, symbol, date, rate
               FROM forex ORDER BY iso_code"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(DbForexRow::into_domain).collect()
    }

    async fn get(&self, code: &IsoCode) -> Result<Option<ForexEntry>, StoreError> {
        let row: Option<DbForexRow> = sqlx::query_as(
            r#"SELECT iso_code, territory, currency, symbol, date, rate
               FROM forex WHERE iso_code = ?"#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(DbForexRow::into_domain).transpose()
    }
}
