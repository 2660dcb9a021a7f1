use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use workhub_backend::cache::listing_cache;
use workhub_backend::config::AppConfig;
use workhub_backend::handlers;
use workhub_backend::load_store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();

    let store = load_store(&config.data_path)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let store_data = web::Data::new(store);

    let cache_data = web::Data::new(listing_cache(&config.cache));
    tracing::info!(ttl_secs = config.cache.ttl.as_secs(), "Listing cache ready");

    let bind_addr = config.bind_addr();
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(store_data.clone())
            .app_data(cache_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
