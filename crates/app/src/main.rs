use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "cashbook={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::warn!("no server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let db = parse_database(&server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;

    let engine = engine::Engine::builder()
        .database(db.clone())
        .build()
        .await
        .inspect_err(|err| tracing::error!("failed to build engine from database: {err}"))?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .inspect_err(|err| tracing::error!("failed to bind server listener: {err}"))?;

    server::run_with_listener(engine, db, listener)
        .await
        .inspect_err(|err| tracing::error!("server failed: {err}"))?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
