use color_eyre::eyre::Result;
use dotenv::dotenv;
use gym_api::config::{parse_log_level, DEFAULT_DATABASE_URL};
use gym_db::schema::initialize_database;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let level = parse_log_level(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    info!("Connecting to database {}", database_url);
    let db_pool = gym_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;
    db_pool.close().await;

    Ok(())
}
