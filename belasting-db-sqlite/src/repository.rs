use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use belasting_core::{
    AdviceRepository, BusinessType, DeadlineCategory, DeductionRule, NewDeductionRule,
    RepositoryError, TaxDeadline,
};
use chrono::NaiveDate;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::{debug, info};

use crate::decimal::{decimal_to_f64, get_optional_decimal};

const RULE_COLUMNS: &str =
    "id, category, item, description, conditions, percentage, business_type, sector";

const INSERT_RULE: &str = "INSERT INTO deduction_rules
        (category, item, description, conditions, percentage, business_type, sector)
     VALUES (?, ?, ?, ?, ?, ?, ?)";

const DEADLINE_COLUMNS: &str =
    "id, title, description, due_date, category, business_type, is_completed";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
            info!(file = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get_business_type(row: &sqlx::sqlite::SqliteRow) -> Result<BusinessType, RepositoryError> {
    let raw: String = row.try_get("business_type").map_err(db_err)?;
    BusinessType::parse(&raw)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid business type: {}", raw)))
}

fn row_to_deduction_rule(row: &sqlx::sqlite::SqliteRow) -> Result<DeductionRule, RepositoryError> {
    Ok(DeductionRule {
        id: row.try_get("id").map_err(db_err)?,
        category: row.try_get("category").map_err(db_err)?,
        item: row.try_get("item").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        conditions: row.try_get("conditions").map_err(db_err)?,
        percentage: get_optional_decimal(row, "percentage")?,
        business_type: get_business_type(row)?,
        sector: row.try_get("sector").map_err(db_err)?,
    })
}

fn row_to_tax_deadline(row: &sqlx::sqlite::SqliteRow) -> Result<TaxDeadline, RepositoryError> {
    let category: String = row.try_get("category").map_err(db_err)?;
    let category = DeadlineCategory::parse(&category)
        .ok_or_else(|| RepositoryError::Database(format!("Invalid deadline category: {}", category)))?;

    Ok(TaxDeadline {
        id: row.try_get("id").map_err(db_err)?,
        title: row.try_get("title").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        due_date: row
            .try_get::<NaiveDate, _>("due_date")
            .map_err(|e| RepositoryError::Database(format!("Failed to get due_date: {}", e)))?,
        category,
        business_type: get_business_type(row)?,
        is_completed: row.try_get("is_completed").map_err(db_err)?,
    })
}

#[async_trait]
impl AdviceRepository for SqliteRepository {
    async fn list_deduction_rules(&self) -> Result<Vec<DeductionRule>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM deduction_rules ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(row_to_deduction_rule).collect()
    }

    async fn get_deduction_rule(
        &self,
        id: i64,
    ) -> Result<DeductionRule, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {RULE_COLUMNS} FROM deduction_rules WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_deduction_rule(&row)
    }

    async fn insert_deduction_rule(
        &self,
        rule: &NewDeductionRule,
    ) -> Result<DeductionRule, RepositoryError> {
        let result = sqlx::query(INSERT_RULE)
            .bind(&rule.category)
            .bind(&rule.item)
            .bind(&rule.description)
            .bind(&rule.conditions)
            .bind(rule.percentage.map(decimal_to_f64))
            .bind(rule.business_type.as_str())
            .bind(&rule.sector)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        self.get_deduction_rule(result.last_insert_rowid()).await
    }

    async fn delete_deduction_rules_in_category(
        &self,
        category: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM deduction_rules WHERE category = ?")
            .bind(category)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        debug!(category, deleted = result.rows_affected(), "deleted deduction rules");
        Ok(result.rows_affected())
    }

    async fn replace_deduction_rules_in_category(
        &self,
        category: &str,
        rules: &[NewDeductionRule],
    ) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let deleted = sqlx::query("DELETE FROM deduction_rules WHERE category = ?")
            .bind(category)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        for rule in rules {
            sqlx::query(INSERT_RULE)
                .bind(&rule.category)
                .bind(&rule.item)
                .bind(&rule.description)
                .bind(&rule.conditions)
                .bind(rule.percentage.map(decimal_to_f64))
                .bind(rule.business_type.as_str())
                .bind(&rule.sector)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        debug!(category, deleted, inserted = rules.len(), "replaced deduction rules");
        Ok(deleted)
    }

    async fn list_tax_deadlines(&self) -> Result<Vec<TaxDeadline>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {DEADLINE_COLUMNS} FROM tax_deadlines ORDER BY due_date, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(row_to_tax_deadline).collect()
    }

    async fn get_tax_deadline(
        &self,
        id: i64,
    ) -> Result<TaxDeadline, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {DEADLINE_COLUMNS} FROM tax_deadlines WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        row_to_tax_deadline(&row)
    }

    async fn set_deadline_completed(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<TaxDeadline, RepositoryError> {
        let result = sqlx::query("UPDATE tax_deadlines SET is_completed = ? WHERE id = ?")
            .bind(is_completed)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_tax_deadline(id).await
    }
}
