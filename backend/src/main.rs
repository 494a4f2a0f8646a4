use backend::{build_rocket, config::Config, cors::Cors, routes::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚀 Starting TheEnd.page vote server");

    let config = Config::load()?;
    let app_state = AppState::new(&config);

    build_rocket(app_state, Cors::new(config.allowed_origin.clone()))
        .launch()
        .await?;

    info!("👋 Vote server stopped");
    Ok(())
}
