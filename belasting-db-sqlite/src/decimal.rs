use belasting_core::RepositoryError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Row, TypeInfo, ValueRef};

/// Read an optional decimal column, accepting both INTEGER and REAL storage.
pub fn get_optional_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(None);
    }

    let type_name = value_ref.type_info().name().to_string();
    match type_name.as_str() {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Some(Decimal::from(val)))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map(Some).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        other => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            other, column
        ))),
    }
}

/// Convert a Decimal to f64 for SQLite storage.
pub fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                value ANY,
                text_value TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");
        pool
    }

    async fn fetch(
        pool: &SqlitePool,
        insert: &str,
        column: &str,
    ) -> Result<Option<Decimal>, RepositoryError> {
        sqlx::query(insert)
            .execute(pool)
            .await
            .expect("Failed to insert test data");
        let row = sqlx::query(&format!("SELECT {column} FROM test_decimals WHERE id = 1"))
            .fetch_one(pool)
            .await
            .expect("Failed to fetch row");
        get_optional_decimal(&row, column)
    }

    #[tokio::test]
    async fn reads_integer_as_decimal() {
        let pool = setup_test_db().await;

        let result = fetch(&pool, "INSERT INTO test_decimals (id, value) VALUES (1, 80)", "value").await;

        assert_eq!(result, Ok(Some(dec!(80))));
    }

    #[tokio::test]
    async fn reads_real_as_decimal() {
        let pool = setup_test_db().await;

        let result = fetch(&pool, "INSERT INTO test_decimals (id, value) VALUES (1, 12.5)", "value").await;

        assert_eq!(result, Ok(Some(dec!(12.5))));
    }

    #[tokio::test]
    async fn reads_null_as_none() {
        let pool = setup_test_db().await;

        let result = fetch(&pool, "INSERT INTO test_decimals (id) VALUES (1)", "value").await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn rejects_text_column() {
        let pool = setup_test_db().await;

        let result = fetch(
            &pool,
            "INSERT INTO test_decimals (id, text_value) VALUES (1, 'tachtig')",
            "text_value",
        )
        .await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn missing_column_is_an_error() {
        let pool = setup_test_db().await;
        sqlx::query("INSERT INTO test_decimals (id, value) VALUES (1, 80)")
            .execute(&pool)
            .await
            .expect("Failed to insert test data");
        let row = sqlx::query("SELECT id, value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert!(get_optional_decimal(&row, "missing").is_err());
    }

    #[test]
    fn decimal_to_f64_converts() {
        assert_eq!(decimal_to_f64(dec!(80)), 80.0);
        assert_eq!(decimal_to_f64(dec!(12.5)), 12.5);
    }
}
