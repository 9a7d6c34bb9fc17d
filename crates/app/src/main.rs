use std::sync::Arc;

use migration::{Migrator, MigratorTrait};

use assist::{OpenAiClient, RateClient};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "gruzzolo={level},server={level},engine={level},assist={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server_settings) = settings.server else {
        tracing::error!("no server settings found; nothing to run");
        return Ok(());
    };

    let db = parse_database(&server_settings.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    // Without assist credentials the endpoints stay routable and fail per
    // call, matching how the rest of the app treats the helper services as
    // best effort.
    let (openai, rates) = match &settings.assist {
        Some(assist) => (
            OpenAiClient::new(&assist.api_key, assist.base_url.as_deref()),
            RateClient::new(assist.rates_url.as_deref()),
        ),
        None => {
            tracing::warn!("no assist settings found; assistant calls will fail");
            (OpenAiClient::new("", None), RateClient::new(None))
        }
    };

    let state = server::ServerState::new(
        engine,
        Arc::new(openai.clone()),
        Arc::new(openai),
        Arc::new(rates),
    );

    let bind = server_settings.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server_settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(state, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
