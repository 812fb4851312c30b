//! Pipeline worker: wires config, database, stores, and the provider
//! client together, then dispatches `project.created` events until
//! shutdown.

use std::sync::Arc;

use anyhow::Context;
use renovo_events::EventBus;
use renovo_imagegen::{GenerationApi, TaskPoller};
use renovo_pipeline::{Orchestrator, PgProjectStore, PipelineConfig, ProjectCreatedListener};
use renovo_secrets::{AwsSecretStore, SecretResolver};
use renovo_storage::S3Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renovo_worker=debug,renovo_pipeline=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PipelineConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = renovo_db::create_pool(&database_url)
        .await
        .context("failed to connect to Postgres")?;
    renovo_db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    renovo_db::health_check(&pool)
        .await
        .context("database health check failed")?;

    let blobs = Arc::new(
        S3Store::connect(config.media_bucket.clone(), config.aws_region.clone()).await,
    );
    let secrets = SecretResolver::new(
        config.secrets_scope.clone(),
        Arc::new(AwsSecretStore::connect(config.aws_region.clone()).await),
    );
    let api = GenerationApi::new(config.provider_api_url.clone());
    let poller = TaskPoller::new(config.poll_max_attempts, config.poll_interval_ms);

    let orchestrator = Arc::new(Orchestrator::new(
        PgProjectStore::new(pool.clone()),
        blobs,
        api,
        poller,
        secrets,
        &config,
    ));

    // The bus is the integration point with the upload surface: any
    // in-process publisher of project.created feeds the pipeline.
    let bus = Arc::new(EventBus::default());
    let receiver = bus.subscribe();

    tracing::info!(
        provider = %config.provider_api_url,
        bucket = %config.media_bucket,
        "Worker started; listening for project.created events",
    );

    tokio::select! {
        () = ProjectCreatedListener::run(orchestrator, receiver) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for shutdown signal")?;
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
