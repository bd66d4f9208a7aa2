use std::sync::Arc;

use anyhow::{Context, Result};
use belasting_core::AdviceRepository;
use belasting_core::db::{DbConfig, RepositoryRegistry};
use belasting_db_sqlite::SqliteRepositoryFactory;
use tracing::debug;

/// Registry with every backend compiled into this binary.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Open, migrate and seed the configured backend.
pub async fn connect(db_config: &DbConfig) -> Result<Arc<dyn AdviceRepository>> {
    debug!("connecting to {} backend", db_config.backend);
    let repo = build_registry()
        .create(db_config)
        .await
        .with_context(|| format!("Failed to open {} database", db_config.backend))?;
    Ok(Arc::from(repo))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_offers_sqlite() {
        assert_eq!(build_registry().available_backends(), vec!["sqlite"]);
    }

    #[actix_web::test]
    async fn connect_opens_seeded_in_memory_database() {
        let repo = connect(&DbConfig::default()).await.unwrap();

        assert_eq!(repo.list_deduction_rules().await.unwrap().len(), 19);
    }

    #[actix_web::test]
    async fn connect_rejects_unknown_backend() {
        let config = DbConfig {
            backend: "postgres".to_string(),
            connection_string: String::new(),
        };

        let err = connect(&config).await.err().unwrap();

        assert_eq!(err.to_string(), "Failed to open postgres database");
        assert!(format!("{err:#}").contains("unknown backend 'postgres'"));
    }
}
