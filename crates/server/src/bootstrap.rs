use thiserror::Error;
use tracing::info;

use tododo_core::config::{AppConfig, ConfigError, LoadOptions};
use tododo_db::{connect_with_settings, migrations, DbPool};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let db_pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    Ok(Application { config, db_pool })
}

#[cfg(test)]
mod tests {
    use tododo_core::config::{ConfigOverrides, LoadOptions};
    use tododo_slack::commands::{CommandRouter, SlashCommandPayload};

    use crate::bootstrap::bootstrap;
    use crate::engine::TaskCommandEngine;
    use tododo_db::SqlTaskRepository;

    fn valid_options(database_url: &str) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some(database_url.to_string()),
                slack_verification_token: Some("token-test".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_fails_fast_without_verification_token() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                database_url: Some("sqlite::memory:".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .await;

        let message = result.err().expect("error").to_string();
        assert!(message.contains("slack.verification_token"));
    }

    #[tokio::test]
    async fn integration_smoke_covers_startup_and_command_path() {
        let app = bootstrap(valid_options("sqlite::memory:?cache=shared"))
            .await
            .expect("bootstrap should succeed with valid overrides");

        let (table_count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'task'",
        )
        .fetch_one(&app.db_pool)
        .await
        .expect("expected task table to be available after bootstrap");
        assert_eq!(table_count, 1, "bootstrap should expose the task table");

        let router = CommandRouter::new(TaskCommandEngine::new(SqlTaskRepository::new(
            app.db_pool.clone(),
        )));

        let added = router
            .route(SlashCommandPayload {
                command: "/tododo-add".to_owned(),
                text: "Buy milk".to_owned(),
                channel_id: "C1".to_owned(),
                user_id: "U1".to_owned(),
                request_id: "req-smoke".to_owned(),
            })
            .await
            .expect("add command should succeed");
        assert_eq!(added.blocks.len(), 3);

        let listing = router
            .route(SlashCommandPayload {
                command: "/tododo-show".to_owned(),
                text: String::new(),
                channel_id: "C1".to_owned(),
                user_id: "U1".to_owned(),
                request_id: "req-smoke-2".to_owned(),
            })
            .await
            .expect("show command should succeed");
        assert_eq!(listing.blocks.len(), 3, "one task should render one fields section");

        app.db_pool.close().await;
    }
}
