use color_eyre::eyre::Result;
use dotenv::dotenv;
use fitstudio_api::config::ApiConfig;
use fitstudio_db::{create_pool, pg::PgStore, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.max_connections).await?;

    // Make sure the tables exist; seeding is left to db-init
    initialize_database(&db_pool).await?;

    // Start API server
    fitstudio_api::start_server(config, PgStore::new(db_pool)).await?;

    Ok(())
}
