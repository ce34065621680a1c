mod analysis;
mod db;
mod inference;
mod routes;
mod session;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use db::product_repository::ProductRepository;
use inference::config::AnalysisConfig;
use inference::model::SkinModels;
use routes::configure_routes;
use session::store::SessionStore;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let frontend_dir = if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        format!("{}/../frontend/dist", manifest_dir)
    } else {
        "/usr/src/app/frontend/dist".to_string()
    };

    dotenv::dotenv().ok();

    let config = AnalysisConfig::load().map_err(|e| {
        log::error!("Failed to load analysis config: {}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Config loading failed: {}", e),
        )
    })?;

    let models = SkinModels::load(&config.models).map_err(|e| {
        log::error!("Failed to preload models at startup: {:?}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Model loading failed: {:?}", e),
        )
    })?;
    log::info!(
        "Loaded skin-type classifier '{}' and skin-problem segmenter '{}'",
        config.models.skin_type.path,
        config.models.skin_problem.path
    );

    // Initialize AWS configuration and the product store client.
    let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let dynamodb_client = DynamoDbClient::new(&aws_config);

    let products_table = env::var("DYNAMODB_PRODUCTS_TABLE").unwrap().to_string();
    let product_repo = ProductRepository::new(dynamodb_client, products_table);
    let sessions = SessionStore::default();

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(models.clone()))
            .app_data(web::Data::new(product_repo.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
