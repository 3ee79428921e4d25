use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "bottega={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let server_settings = settings.server;
    let db = parse_database(&server_settings.database).await?;

    let engine = engine::Engine::builder().database(db).build().await?;

    let auth_keys = server::AuthKeys::from_secret(&server_settings.jwt_secret);
    let ai = server_settings.ai.map(|ai| server::AiProvider {
        url: ai.url,
        token: ai.token,
    });

    let bind = server_settings
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, auth_keys, ai, listener).await?;

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
