//! Book reader server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

mod api;
mod config;
mod error;
mod middleware;
mod models;
mod services;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ApiDoc;
use crate::config::Config;
use crate::services::{FileRegistry, LibraryStore, TelegramStreamer};

/// Perform health check (for Docker healthcheck).
async fn health_check() -> bool {
    // Simple check - just verify we can load config
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        if health_check().await {
            std::process::exit(0);
        } else {
            std::process::exit(1);
        }
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, BOT_TOKEN and WEBAPP_URL must be set");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Book Reader Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    if config.bot_token.is_none() {
        warn!("BOT_TOKEN is not set; remote file streaming will fail until it is configured");
    }

    // Create the library directory tree
    tokio::fs::create_dir_all(&config.books_dir)
        .await
        .expect("Failed to create books directory");
    tokio::fs::create_dir_all(config.user_books_dir())
        .await
        .expect("Failed to create user books directory");
    info!("Library root: {}", config.books_dir.display());

    if let Some(cap) = config.max_files_per_user {
        info!("Remote registry capped at {} files per user", cap);
    }

    // Shared services, constructed once and handed to every worker
    let library = web::Data::new(LibraryStore::new(config.books_dir.clone()));
    let registry = web::Data::new(FileRegistry::new(config.max_files_per_user));
    let streamer = web::Data::new(TelegramStreamer::new(
        config.telegram_api_base.clone(),
        config.bot_token.clone(),
    ));

    let bind_address = config.bind_address();
    let books_dir = config.books_dir.clone();
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    if let Some(ref dir) = static_dir {
        info!("Static asset serving enabled from {:?}", dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    // Start HTTP server
    let server = HttpServer::new(move || {
        // Configure CORS: permissive for local frontend development,
        // same-origin in production (the Telegram web app is served
        // from this origin).
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:8000")
                .allowed_origin("http://127.0.0.1:8000")
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        } else {
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        let mut app = App::new()
            // Add CORS middleware (must be before other middleware)
            .wrap(cors)
            // Add request logging middleware
            .wrap(middleware::RequestLogger)
            // Add shared state
            .app_data(library.clone())
            .app_data(registry.clone())
            .app_data(streamer.clone())
            // API routes
            .service(
                web::scope("/api")
                    .configure(api::configure_health_routes)
                    .configure(api::configure_book_routes),
            )
            // Streaming proxy and HTML pages at the root
            .configure(api::configure_stream_routes)
            .configure(api::configure_page_routes)
            // Local library served directly from disk
            .service(Files::new("/books", books_dir.clone()).prefer_utf8(true));

        // Serve frontend assets when a static dir is configured
        if let Some(ref dir) = static_dir {
            app = app.service(Files::new("/static", dir.clone()).prefer_utf8(true));
        }

        // Swagger UI in development only
        if is_development {
            app = app.service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        app
    });

    // Set worker count
    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
