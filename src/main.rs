use actix_web::web;
use dotenvy::dotenv;
use storefront::{build_server, AppConfig, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let state = AppState::in_memory(&config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    log::info!(
        "Catalog holds {} products",
        state.catalog.list_products(&Default::default()).map(|p| p.len()).unwrap_or(0)
    );
    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!("API docs at http://{}:{}/swagger-ui/", config.host, config.port);

    build_server(web::Data::new(state), &config.host, config.port)?.await
}
