mod config;
mod models;
mod services;
mod handlers;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{web, App, HttpServer, middleware::Logger};
use std::path::Path;

use config::Config;
use handlers::{upload_dataset, preview_dataset, query_chart, describe_chart};
use services::{ChartService, DatasetStore, OpenAiService, RelevanceFilter};

/// Serve the single-page frontend
async fn serve_index(config: web::Data<Config>) -> actix_web::Result<NamedFile> {
    let index_path = Path::new(config.static_dir.as_str()).join("index.html");
    Ok(NamedFile::open_async(index_path).await?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("🚀 Starting Chart Chat API");

    // Load configuration from environment variables
    let config = Config::from_env();

    // Initialize services
    let completion_service = match OpenAiService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            log::error!("❌ Failed to initialize completion service: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };
    let dataset_store = DatasetStore::new();
    let relevance_filter = RelevanceFilter::new();
    let chart_service = ChartService::new(completion_service);

    // Start HTTP server
    let server_port = config.server_port;
    let server_url = format!("http://127.0.0.1:{}", server_port);
    log::info!("🌐 Starting server at {}", server_url);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(dataset_store.clone()))
            .app_data(web::Data::new(relevance_filter.clone()))
            .app_data(web::Data::new(chart_service.clone()))
            .service(web::resource("/upload").route(web::post().to(upload_dataset)))
            .service(web::resource("/preview").route(web::get().to(preview_dataset)))
            .service(web::resource("/query").route(web::post().to(query_chart::<OpenAiService>)))
            .service(web::resource("/describe").route(web::post().to(describe_chart::<OpenAiService>)))
            .service(web::resource("/").route(web::get().to(serve_index)))
            .service(Files::new("/static", config.static_dir.clone()))
    })
    .bind(format!("127.0.0.1:{}", server_port))
    .map_err(|e| {
        log::error!("❌ Failed to bind to port {}: {}", server_port, e);
        e
    })?
    .run()
    .await
}
